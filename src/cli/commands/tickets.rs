use ansi_term::Colour;

use crate::config::Config;
use crate::errors::AppResult;
use crate::jira::WorklogClient;
use crate::models::TicketHierarchy;
use crate::ui::messages;

/// List open tickets as a Project → Epic → Main task → Ticket tree.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let client = WorklogClient::from_config(cfg)?;
    let hierarchy = client.get_open_tickets()?;
    if hierarchy.is_empty() {
        messages::warning("No open tickets assigned to you.");
        return Ok(());
    }
    print_tree(&hierarchy);
    Ok(())
}

fn print_tree(hierarchy: &TicketHierarchy) {
    for project in hierarchy.values() {
        println!("{}", Colour::Blue.bold().paint(&project.name));
        for (epic_key, epic) in &project.epics {
            println!("  {} {}", Colour::Purple.paint(epic_key), epic.name);
            for (task_key, task) in &epic.main_tasks {
                println!("    {} {}", Colour::Yellow.paint(task_key), task.summary);
                for ticket in &task.tickets {
                    println!(
                        "      {} - {} [{}]",
                        Colour::Green.paint(&ticket.key),
                        ticket.summary,
                        ticket.issue_type
                    );
                }
            }
        }
    }
}
