pub mod date;
pub mod time;

pub use time::parse_clock_time;
