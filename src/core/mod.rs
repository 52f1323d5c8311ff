pub mod clock;
pub mod duration;
pub mod parser;

pub use clock::{SystemTimeSource, TimeSource, WorkdayClock};
pub use parser::{extract_comment, CommitParser};
