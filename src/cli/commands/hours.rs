use crate::config::Config;
use crate::errors::AppResult;
use crate::jira::WorklogClient;
use crate::ui::messages;

/// Show total hours logged for a date (today by default).
pub fn handle(date: Option<&str>, cfg: &Config) -> AppResult<()> {
    let client = WorklogClient::from_config(cfg)?;
    let hours = client.get_hours_logged(date)?;
    messages::info(format!(
        "Hours logged for {}: {}",
        date.unwrap_or("today"),
        hours
    ));
    Ok(())
}
