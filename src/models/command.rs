//! Typed result of commit-message extraction.

use chrono::{DateTime, Local};

/// A fully resolved logging intent: ticket and duration are always present.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCommand {
    /// Tracker issue key, e.g. `AHPM-124`.
    pub ticket: String,
    /// Canonical duration string, e.g. `2h 30m`. Never a zero-duration value.
    pub duration: String,
    pub close: bool,
    /// Start time the duration was computed from, when one was involved
    /// (`-st` override or `-a` auto-calculation).
    pub start: Option<DateTime<Local>>,
}

/// Outcome of scanning a commit message. `Unloggable` means the caller must
/// skip logging; it is not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Loggable(ParsedCommand),
    Unloggable,
}

impl Extraction {
    pub fn loggable(self) -> Option<ParsedCommand> {
        match self {
            Extraction::Loggable(cmd) => Some(cmd),
            Extraction::Unloggable => None,
        }
    }
}
