use clap::{Parser, Subcommand};

/// Command-line interface definition for jiralog
/// CLI tool to log tracker worklogs from commit messages
#[derive(Parser)]
#[command(
    name = "jiralog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Log JIRA worklogs from commit messages, with workday start tracking and auto-calculated hours",
    long_about = None
)]
pub struct Cli {
    /// Override the config file path (useful for tests or multiple trackers)
    #[arg(global = true, long = "config")]
    pub config: Option<String>,

    /// Override the start-time file path
    #[arg(global = true, long = "start-file")]
    pub start_file: Option<String>,

    /// With no subcommand, the last git commit message is parsed and logged.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the workday: save the start time used for auto-calculated hours
    Start {
        #[arg(
            long = "st",
            value_name = "TIME",
            help = "Start at a specific time (HH:MM or HH:MMam/pm) instead of now"
        )]
        at: Option<String>,

        #[arg(short = 'p', long = "print", help = "Print the saved start time and exit")]
        print: bool,
    },

    /// Extract ticket, hours and close flag from a commit message and log them
    Commit {
        /// Commit message to parse (defaults to the last git commit)
        message: Option<String>,

        #[arg(long, value_name = "DATE", help = "Backdate the worklog (YYYY-MM-DD)")]
        date: Option<String>,
    },

    /// Log a worklog entry directly
    Log {
        /// Ticket key, e.g. AHPM-124
        ticket: String,

        /// Duration, e.g. "2h", "1h 30m", "90 minutes"
        duration: String,

        #[arg(long, help = "Worklog comment")]
        comment: Option<String>,

        #[arg(long = "close", help = "Transition the ticket to Done after logging")]
        close: bool,

        #[arg(long, value_name = "DATE", help = "Backdate the worklog (YYYY-MM-DD)")]
        date: Option<String>,
    },

    /// Transition a ticket to the configured done status
    Close {
        ticket: String,
    },

    /// List open tickets grouped by project, epic and main task
    Tickets,

    /// Show total hours logged for a date (today by default)
    Hours {
        date: Option<String>,
    },

    /// List worklog entries for a date (today by default)
    Worklogs {
        date: Option<String>,
    },

    /// Delete the most recent worklog entry for a date
    #[command(alias = "undo_last_log")]
    UndoLastLog {
        date: Option<String>,
    },

    /// Delete all worklog entries for a date
    #[command(alias = "undo_all_today")]
    UndoAllToday {
        date: Option<String>,
    },

    /// Run the local command server
    Serve {
        #[arg(long, default_value_t = 5000)]
        port: u16,
    },
}
