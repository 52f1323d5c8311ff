//! Builds the Project → Epic → Main task → Ticket tree out of raw tracker
//! search results.
//!
//! Epic membership comes from the epic-link custom fields when present,
//! otherwise from walking the parent chain up to the nearest epic. Tickets
//! without either land under "No Epic" / "No Main Task" buckets.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::models::ticket::{
    EpicNode, MainTaskNode, ProjectNode, TicketNode, NO_EPIC, NO_MAIN_TASK,
};
use crate::models::TicketHierarchy;

/// Epic link of an issue, from either of the two custom fields trackers use.
pub fn epic_link(issue: &Value) -> Option<String> {
    for field in ["customfield_10008", "customfield_10009"] {
        if let Some(link) = issue["fields"][field].as_str() {
            if !link.is_empty() {
                return Some(link.to_string());
            }
        }
    }
    None
}

fn issue_type(issue: &Value) -> String {
    issue["fields"]["issuetype"]["name"]
        .as_str()
        .unwrap_or("Task")
        .to_string()
}

fn summary(issue: &Value) -> String {
    issue["fields"]["summary"].as_str().unwrap_or_default().to_string()
}

fn find_issue<'a>(issues: &'a [Value], key: &str) -> Option<&'a Value> {
    issues.iter().find(|i| i["key"].as_str() == Some(key))
}

/// Walk the parent chain of `issue` up to the nearest epic key, if any.
fn nearest_epic(issues: &[Value], issue: &Value) -> Option<String> {
    let mut current = issue["fields"]["parent"]["key"].as_str().map(str::to_string);
    while let Some(key) = current {
        let parent = find_issue(issues, &key)?;
        if issue_type(parent) == "Epic" {
            return Some(key);
        }
        current = parent["fields"]["parent"]["key"].as_str().map(str::to_string);
    }
    None
}

pub fn build(issues: &[Value]) -> TicketHierarchy {
    let mut hierarchy: TicketHierarchy = BTreeMap::new();

    // First pass: register every project and its epics.
    for issue in issues {
        let project = &issue["fields"]["project"];
        let project_id = project["id"].as_str().unwrap_or("unknown").to_string();
        let project_name = project["name"].as_str().unwrap_or("Unknown Project").to_string();
        let node = hierarchy.entry(project_id).or_insert_with(|| ProjectNode {
            name: project_name,
            epics: BTreeMap::new(),
        });
        if issue_type(issue) == "Epic" {
            let key = issue["key"].as_str().unwrap_or_default().to_string();
            node.epics.entry(key).or_insert_with(|| EpicNode {
                name: summary(issue),
                issue_type: "Epic".to_string(),
                main_tasks: BTreeMap::new(),
            });
        }
    }

    // Second pass: place every non-epic under its epic and main task.
    for issue in issues {
        if issue_type(issue) == "Epic" {
            continue;
        }
        let project_id = issue["fields"]["project"]["id"]
            .as_str()
            .unwrap_or("unknown")
            .to_string();
        let Some(project_node) = hierarchy.get_mut(&project_id) else {
            continue;
        };

        let parent = &issue["fields"]["parent"];
        let parent_key = parent["key"].as_str().map(str::to_string);
        let parent_summary = parent["fields"]["summary"].as_str().map(str::to_string);
        let parent_type = parent["fields"]["issuetype"]["name"].as_str().map(str::to_string);

        let epic_id = epic_link(issue)
            .filter(|link| project_node.epics.contains_key(link))
            .or_else(|| {
                nearest_epic(issues, issue).filter(|key| project_node.epics.contains_key(key))
            })
            .unwrap_or_else(|| NO_EPIC.to_string());
        project_node
            .epics
            .entry(epic_id.clone())
            .or_insert_with(|| EpicNode {
                name: NO_EPIC.to_string(),
                issue_type: "None".to_string(),
                main_tasks: BTreeMap::new(),
            });

        // Main-task bucket: the direct parent, unless that parent is the
        // epic itself (then the ticket sits directly under the epic).
        let parent_is_epic = parent_key
            .as_deref()
            .map(|key| {
                (epic_id != NO_EPIC && key == epic_id)
                    || project_node
                        .epics
                        .get(key)
                        .map(|e| e.issue_type == "Epic")
                        .unwrap_or(false)
            })
            .unwrap_or(false);
        let (main_task_id, main_task_summary, main_task_type) = match &parent_key {
            Some(_) if parent_is_epic => (
                NO_MAIN_TASK.to_string(),
                NO_MAIN_TASK.to_string(),
                "None".to_string(),
            ),
            Some(key) => (
                key.clone(),
                parent_summary.unwrap_or_else(|| key.clone()),
                parent_type.unwrap_or_else(|| "Task".to_string()),
            ),
            None => (
                NO_MAIN_TASK.to_string(),
                NO_MAIN_TASK.to_string(),
                "None".to_string(),
            ),
        };

        // Epics never appear as main tasks under the "No Epic" bucket.
        if epic_id == NO_EPIC
            && project_node
                .epics
                .get(&main_task_id)
                .map(|e| e.issue_type == "Epic")
                .unwrap_or(false)
        {
            continue;
        }

        let epic_node = project_node
            .epics
            .get_mut(&epic_id)
            .expect("epic bucket inserted above");
        let main_task = epic_node
            .main_tasks
            .entry(main_task_id)
            .or_insert_with(|| MainTaskNode {
                summary: main_task_summary,
                issue_type: main_task_type,
                tickets: Vec::new(),
            });
        main_task.tickets.push(TicketNode {
            key: issue["key"].as_str().unwrap_or_default().to_string(),
            summary: summary(issue),
            issue_type: issue_type(issue),
        });
    }

    hierarchy
}
