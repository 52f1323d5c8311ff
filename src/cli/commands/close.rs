use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::jira::WorklogClient;
use crate::ui::messages;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Close { ticket } = cmd {
        let client = WorklogClient::from_config(cfg)?;
        client.close_ticket(ticket)?;
        messages::success(format!("Ticket {} closed.", ticket));
    }
    Ok(())
}
