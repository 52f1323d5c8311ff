//! Typed records for worklog queries and mutations.

use serde::{Deserialize, Serialize};

/// One worklog entry as reported by the tracker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorklogRecord {
    pub issue_key: String,
    pub summary: String,
    pub comment: String,
    pub time_spent: String,
    /// Tracker-formatted start timestamp, e.g. `2025-08-30T09:00:00.000+0000`.
    pub started: String,
    pub worklog_id: String,
}

/// Result of a worklog deletion, reported back to the user or the HTTP caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub deleted: usize,
}

impl DeleteOutcome {
    pub fn ok(message: impl Into<String>, deleted: usize) -> Self {
        Self {
            success: true,
            message: message.into(),
            deleted,
        }
    }

    pub fn failed(message: impl Into<String>, deleted: usize) -> Self {
        Self {
            success: false,
            message: message.into(),
            deleted,
        }
    }
}
