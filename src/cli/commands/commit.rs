//! Commit-driven logging: the default flow, meant to run from a git
//! post-commit hook or by hand.

use std::io::{stdin, stdout, IsTerminal, Write};
use std::process::Command;

use crate::config::Config;
use crate::core::{extract_comment, CommitParser, WorkdayClock};
use crate::errors::AppResult;
use crate::jira::WorklogClient;
use crate::models::{Extraction, TicketHierarchy};
use crate::ui::messages;

/// Parse `message` (or the last git commit message) and log the result.
pub fn handle(message: Option<&str>, date: Option<&str>, cfg: &Config) -> AppResult<()> {
    let msg = match message {
        Some(m) => m.to_string(),
        None => last_commit_message(),
    };

    let clock = WorkdayClock::from_config(cfg)?;
    let parser = CommitParser::new(&clock, cfg.round_minutes, cfg.min_log_minutes);
    let extraction = parser.extract(&msg)?;
    let comment = format!("On commit: {}", extract_comment(&msg));

    let (ticket, duration, close) = match extraction {
        Extraction::Loggable(cmd) => {
            messages::info(format!(
                "Detected tracker info in commit message: {}, {}, close: {}",
                cmd.ticket, cmd.duration, cmd.close
            ));
            (cmd.ticket, cmd.duration, cmd.close)
        }
        Extraction::Unloggable => {
            if !stdin().is_terminal() {
                messages::warning(
                    "No tracker info found in commit message and not running interactively. \
                     Skipping logging.",
                );
                return Ok(());
            }
            match prompt_for_entry(cfg)? {
                Some(entry) => entry,
                None => return Ok(()),
            }
        }
    };

    let client = WorklogClient::from_config(cfg)?;
    messages::info(format!("Logging {} to {}...", duration, ticket));
    client.log_work(&ticket, &duration, &comment, date)?;
    messages::success("Hours logged.");

    // A failed close is reported but does not abort: the hours are already
    // logged, and the clock reset below must happen regardless.
    if close {
        match client.close_ticket(&ticket) {
            Ok(()) => messages::success(format!("Ticket {} closed.", ticket)),
            Err(e) => messages::error(format!("Could not close {}: {}", ticket, e)),
        }
    }

    // Reset the start marker so the next auto-calculated period begins here.
    clock.set_start_time()?;
    Ok(())
}

fn last_commit_message() -> String {
    Command::new("git")
        .args(["log", "-1", "--pretty=%B"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "Auto-logged from script".to_string())
}

/// Interactive fallback: free-form `<ticket> <time> <close>` input, or pick a
/// ticket from the open-ticket list.
fn prompt_for_entry(cfg: &Config) -> AppResult<Option<(String, String, bool)>> {
    println!("Format: <ticket> <time> <close(y/N)> (e.g., AHPM-123 2h y)");
    let inp = prompt("Enter ticket, time, and close flag (leave blank to choose from list): ")?;

    if inp.is_empty() {
        let client = WorklogClient::from_config(cfg)?;
        messages::info("Fetching open tickets assigned to you...");
        let hierarchy = client.get_open_tickets()?;
        let tickets = flatten(&hierarchy);
        if tickets.is_empty() {
            messages::warning("No open tickets assigned to you.");
            return Ok(None);
        }
        println!("Open tickets:");
        for (idx, (key, summary)) in tickets.iter().enumerate() {
            println!("{}. {} - {}", idx + 1, key, summary);
        }
        let selection = prompt("Select a ticket number: ")?;
        let ticket = match selection.parse::<usize>().ok().and_then(|n| tickets.get(n.wrapping_sub(1))) {
            Some((key, _)) => key.clone(),
            None => {
                messages::error("Invalid selection.");
                return Ok(None);
            }
        };
        let duration = crate::core::duration::normalize(&prompt("Enter hours to log (e.g., 1h 30m): ")?);
        let close = prompt("Do you want to close this ticket? (y/N): ")?;
        return Ok(Some((ticket, duration, matches_yes(&close))));
    }

    let parts: Vec<&str> = inp.split_whitespace().collect();
    if parts.len() < 2 {
        messages::error("Invalid input format.");
        return Ok(None);
    }
    let close = parts.get(2).map(|s| matches_yes(s)).unwrap_or(false);
    Ok(Some((parts[0].to_string(), parts[1].to_string(), close)))
}

fn prompt(text: &str) -> AppResult<String> {
    print!("{}", text);
    stdout().flush()?;
    let mut line = String::new();
    stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn matches_yes(s: &str) -> bool {
    matches!(s.to_lowercase().as_str(), "y" | "c" | "yes")
}

/// Flatten the hierarchy to (key, summary) pairs for the selection list.
fn flatten(hierarchy: &TicketHierarchy) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for project in hierarchy.values() {
        for epic in project.epics.values() {
            for main_task in epic.main_tasks.values() {
                for ticket in &main_task.tickets {
                    out.push((ticket.key.clone(), ticket.summary.clone()));
                }
            }
        }
    }
    out
}
