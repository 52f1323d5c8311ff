#![allow(dead_code)]
use assert_cmd::{cargo_bin_cmd, Command};
use chrono::{DateTime, Local, NaiveTime, TimeZone};
use std::path::PathBuf;

use jiralog::core::clock::{TimeSource, WorkdayClock};

pub fn jl() -> Command {
    cargo_bin_cmd!("jiralog")
}

/// Time source frozen at a known instant, so clock and parser behavior is
/// deterministic.
pub struct FixedTime(pub DateTime<Local>);

impl TimeSource for FixedTime {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

pub fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

pub fn cutoff_6am() -> NaiveTime {
    NaiveTime::from_hms_opt(6, 0, 0).unwrap()
}

/// Clock over a start-time file inside `dir`, frozen at `now`.
pub fn test_clock(dir: &tempfile::TempDir, now: DateTime<Local>) -> WorkdayClock {
    let path: PathBuf = dir.path().join("start_time");
    WorkdayClock::new(path, cutoff_6am(), Box::new(FixedTime(now)))
}

pub fn epoch(dt: DateTime<Local>) -> f64 {
    dt.timestamp_millis() as f64 / 1000.0
}
