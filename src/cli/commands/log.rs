use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::duration;
use crate::core::WorkdayClock;
use crate::errors::AppResult;
use crate::jira::WorklogClient;
use crate::ui::messages;

/// Log a worklog entry directly from the command line.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log {
        ticket,
        duration: raw_duration,
        comment,
        close,
        date,
    } = cmd
    {
        let normalized = duration::normalize(raw_duration);
        if duration::is_zero(&normalized) {
            messages::warning("Zero duration, nothing to log.");
            return Ok(());
        }

        let client = WorklogClient::from_config(cfg)?;
        client.log_work(
            ticket,
            &normalized,
            comment.as_deref().unwrap_or(""),
            date.as_deref(),
        )?;
        messages::success(format!("Logged {} to {}.", normalized, ticket));

        // The worklog is already posted; a failed close is reported and the
        // clock reset still runs.
        if *close {
            match client.close_ticket(ticket) {
                Ok(()) => messages::success(format!("Ticket {} closed.", ticket)),
                Err(e) => messages::error(format!("Could not close {}: {}", ticket, e)),
            }
        }

        WorkdayClock::from_config(cfg)?.set_start_time()?;
    }
    Ok(())
}
