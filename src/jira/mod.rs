pub mod client;
pub mod hierarchy;

pub use client::WorklogClient;
