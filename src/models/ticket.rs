//! Open-ticket hierarchy: Project → Epic → Main task → Ticket.
//!
//! Built from tracker search results; consumed read-only by the ticket
//! listing and the `/tickets` endpoint.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const NO_EPIC: &str = "No Epic";
pub const NO_MAIN_TASK: &str = "No Main Task";

/// Keyed by project id.
pub type TicketHierarchy = BTreeMap<String, ProjectNode>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectNode {
    pub name: String,
    /// Keyed by epic key, or [`NO_EPIC`].
    pub epics: BTreeMap<String, EpicNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EpicNode {
    pub name: String,
    #[serde(rename = "type")]
    pub issue_type: String,
    /// Keyed by main-task key, or [`NO_MAIN_TASK`].
    pub main_tasks: BTreeMap<String, MainTaskNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MainTaskNode {
    pub summary: String,
    #[serde(rename = "type")]
    pub issue_type: String,
    pub tickets: Vec<TicketNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TicketNode {
    pub key: String,
    pub summary: String,
    #[serde(rename = "type")]
    pub issue_type: String,
}
