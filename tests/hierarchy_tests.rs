use jiralog::jira::hierarchy::build;
use jiralog::models::ticket::{NO_EPIC, NO_MAIN_TASK};
use serde_json::{json, Value};

fn epic(key: &str, summary: &str) -> Value {
    json!({
        "key": key,
        "fields": {
            "project": { "id": "100", "name": "Alpha" },
            "issuetype": { "name": "Epic" },
            "summary": summary,
        }
    })
}

fn ticket(key: &str, summary: &str) -> Value {
    json!({
        "key": key,
        "fields": {
            "project": { "id": "100", "name": "Alpha" },
            "issuetype": { "name": "Task" },
            "summary": summary,
        }
    })
}

fn with_epic_link(mut issue: Value, epic_key: &str) -> Value {
    issue["fields"]["customfield_10008"] = json!(epic_key);
    issue
}

fn with_parent(mut issue: Value, key: &str, summary: &str, issue_type: &str) -> Value {
    issue["fields"]["parent"] = json!({
        "key": key,
        "fields": { "summary": summary, "issuetype": { "name": issue_type } }
    });
    issue
}

#[test]
fn ticket_with_epic_link_sits_under_the_epic() {
    let issues = vec![
        epic("AHPM-1", "Speech Model"),
        with_epic_link(ticket("AHPM-2", "Train ASR"), "AHPM-1"),
    ];
    let tree = build(&issues);

    let project = &tree["100"];
    assert_eq!(project.name, "Alpha");
    let epic_node = &project.epics["AHPM-1"];
    assert_eq!(epic_node.name, "Speech Model");
    let tasks = &epic_node.main_tasks[NO_MAIN_TASK];
    assert_eq!(tasks.tickets.len(), 1);
    assert_eq!(tasks.tickets[0].key, "AHPM-2");
}

#[test]
fn epic_found_by_walking_the_parent_chain() {
    // AHPM-3's parent is a task whose own parent is the epic.
    let mid = with_parent(ticket("AHPM-2", "Data pipeline"), "AHPM-1", "Speech Model", "Epic");
    let leaf = with_parent(ticket("AHPM-3", "Cleanup"), "AHPM-2", "Data pipeline", "Task");
    let issues = vec![epic("AHPM-1", "Speech Model"), mid, leaf];
    let tree = build(&issues);

    let epic_node = &tree["100"].epics["AHPM-1"];
    // The leaf hangs under its direct parent as main task.
    let main_task = &epic_node.main_tasks["AHPM-2"];
    assert_eq!(main_task.summary, "Data pipeline");
    assert_eq!(main_task.tickets[0].key, "AHPM-3");
}

#[test]
fn orphan_ticket_lands_in_no_epic_no_main_task() {
    let issues = vec![ticket("AHPM-9", "Loose end")];
    let tree = build(&issues);

    let epic_node = &tree["100"].epics[NO_EPIC];
    assert_eq!(epic_node.issue_type, "None");
    let task = &epic_node.main_tasks[NO_MAIN_TASK];
    assert_eq!(task.tickets[0].key, "AHPM-9");
}

#[test]
fn child_of_epic_sits_directly_under_it() {
    let issues = vec![
        epic("AHPM-1", "Speech Model"),
        with_parent(ticket("AHPM-4", "Subtask of epic"), "AHPM-1", "Speech Model", "Epic"),
    ];
    let tree = build(&issues);

    let epic_node = &tree["100"].epics["AHPM-1"];
    let task = &epic_node.main_tasks[NO_MAIN_TASK];
    assert_eq!(task.tickets[0].key, "AHPM-4");
}

#[test]
fn epics_are_not_listed_as_tickets() {
    let issues = vec![epic("AHPM-1", "Speech Model")];
    let tree = build(&issues);

    let epic_node = &tree["100"].epics["AHPM-1"];
    assert!(epic_node.main_tasks.is_empty());
}
