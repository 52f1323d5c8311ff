use crate::config::Config;
use crate::errors::AppResult;
use crate::jira::WorklogClient;
use crate::ui::messages;

/// Delete the most recent worklog entry for a date.
pub fn handle_last(date: Option<&str>, cfg: &Config) -> AppResult<()> {
    let client = WorklogClient::from_config(cfg)?;
    let outcome = client.delete_last_worklog(date)?;
    if outcome.success {
        messages::success(outcome.message);
    } else {
        messages::warning(outcome.message);
    }
    Ok(())
}

/// Delete all worklog entries for a date.
pub fn handle_all(date: Option<&str>, cfg: &Config) -> AppResult<()> {
    let client = WorklogClient::from_config(cfg)?;
    let outcome = client.delete_all_worklogs(date)?;
    if outcome.success {
        messages::success(outcome.message);
    } else {
        messages::warning(outcome.message);
    }
    Ok(())
}
