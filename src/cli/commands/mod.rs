pub mod close;
pub mod commit;
pub mod hours;
pub mod log;
pub mod serve;
pub mod start;
pub mod tickets;
pub mod undo;
pub mod worklogs;
