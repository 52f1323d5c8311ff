//! jiralog library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod jira;
pub mod models;
pub mod server;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use std::path::PathBuf;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    // No subcommand: parse and log the last git commit message, the
    // post-commit-hook flow.
    let Some(cmd) = &cli.command else {
        return cli::commands::commit::handle(None, None, cfg);
    };

    match cmd {
        Commands::Start { .. } => cli::commands::start::handle(cmd, cfg),
        Commands::Commit { message, date } => {
            cli::commands::commit::handle(message.as_deref(), date.as_deref(), cfg)
        }
        Commands::Log { .. } => cli::commands::log::handle(cmd, cfg),
        Commands::Close { .. } => cli::commands::close::handle(cmd, cfg),
        Commands::Tickets => cli::commands::tickets::handle(cfg),
        Commands::Hours { date } => cli::commands::hours::handle(date.as_deref(), cfg),
        Commands::Worklogs { date } => cli::commands::worklogs::handle(date.as_deref(), cfg),
        Commands::UndoLastLog { date } => cli::commands::undo::handle_last(date.as_deref(), cfg),
        Commands::UndoAllToday { date } => cli::commands::undo::handle_all(date.as_deref(), cfg),
        Commands::Serve { port } => cli::commands::serve::handle(*port, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => Config::load_from(&PathBuf::from(path))?,
        None => Config::load()?,
    };

    if let Some(start_file) = &cli.start_file {
        cfg.start_time_file = start_file.clone();
    }

    dispatch(&cli, &cfg)
}
