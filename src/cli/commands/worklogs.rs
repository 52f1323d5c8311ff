use ansi_term::Colour;

use crate::config::Config;
use crate::errors::AppResult;
use crate::jira::WorklogClient;
use crate::ui::messages;

/// List worklog entries for a date (today by default).
pub fn handle(date: Option<&str>, cfg: &Config) -> AppResult<()> {
    let client = WorklogClient::from_config(cfg)?;
    let logs = client.get_all_worklogs(date)?;
    if logs.is_empty() {
        messages::warning(format!("No worklogs found for {}.", date.unwrap_or("today")));
        return Ok(());
    }
    for log in &logs {
        println!(
            "{}  {}  {:>8}  {}",
            log.started,
            Colour::Green.paint(&log.issue_key),
            log.time_spent,
            log.comment
        );
    }
    Ok(())
}
