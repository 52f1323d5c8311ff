pub mod command;
pub mod ticket;
pub mod worklog;

pub use command::{Extraction, ParsedCommand};
pub use ticket::TicketHierarchy;
pub use worklog::{DeleteOutcome, WorklogRecord};
