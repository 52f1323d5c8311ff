//! Workday start-time clock.
//!
//! One timestamp, persisted in a text file, survives process restarts and is
//! the basis for auto-calculated hours. Reads that find a value saved on a
//! previous day reset it once the daily cutoff has passed, so yesterday's
//! clock never leaks into today's accounting.
//!
//! Concurrent writers are last-writer-wins. The store belongs to a single
//! human user with a low write frequency, so there is no file locking.

use chrono::{DateTime, Datelike, Local, NaiveTime, TimeZone};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::errors::{AppError, AppResult};
use crate::utils::parse_clock_time;

/// Source of "now", injected so tests can freeze time.
pub trait TimeSource {
    fn now(&self) -> DateTime<Local>;
}

/// Wall clock used everywhere outside tests.
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

pub struct WorkdayClock {
    path: PathBuf,
    cutoff: NaiveTime,
    time: Box<dyn TimeSource>,
}

impl WorkdayClock {
    pub fn new(path: impl Into<PathBuf>, cutoff: NaiveTime, time: Box<dyn TimeSource>) -> Self {
        Self {
            path: path.into(),
            cutoff,
            time,
        }
    }

    /// Clock configured from `start_time_file` and `day_cutoff`, on the
    /// system wall clock.
    pub fn from_config(cfg: &crate::config::Config) -> AppResult<Self> {
        let cutoff = parse_clock_time(&cfg.day_cutoff)
            .map_err(|_| AppError::Config(format!("invalid day_cutoff: {}", cfg.day_cutoff)))?;
        Ok(Self::new(
            cfg.start_time_file.clone(),
            cutoff,
            Box::new(SystemTimeSource),
        ))
    }

    pub fn now(&self) -> DateTime<Local> {
        self.time.now()
    }

    /// Read the stored start time as epoch seconds, creating it set to "now"
    /// when absent, and resetting it when it was saved on a previous day and
    /// the daily cutoff has passed.
    pub fn get_start_time(&self) -> AppResult<f64> {
        let stored = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return self.set_start_time();
            }
            Err(e) => return Err(e.into()),
        };

        let saved: f64 = stored.trim().parse().map_err(|_| AppError::Storage {
            path: self.path.display().to_string(),
            reason: format!("unparseable start time: {:?}", stored.trim()),
        })?;

        let now = self.time.now();
        let saved_dt = Local
            .timestamp_opt(saved as i64, 0)
            .single()
            .ok_or_else(|| AppError::Storage {
                path: self.path.display().to_string(),
                reason: format!("start time out of range: {}", saved),
            })?;

        if saved_dt.date_naive() != now.date_naive() && now.time() >= self.cutoff {
            return self.set_start_time();
        }
        Ok(saved)
    }

    /// Overwrite the stored start time with "now". Returns the new value.
    pub fn set_start_time(&self) -> AppResult<f64> {
        let ts = epoch_seconds(self.time.now());
        self.write(ts)?;
        Ok(ts)
    }

    /// Set the start time from a `HH:MM` or `HH:MMam/pm` string, resolved
    /// against today. A time still in the future rolls back one day, so a
    /// shift that began before midnight can be recorded after it. With no
    /// argument this is the same as [`set_start_time`].
    ///
    /// Unparseable input fails without touching the stored value.
    pub fn set_start_time_manual(&self, hhmm: Option<&str>) -> AppResult<f64> {
        let ts = match hhmm {
            Some(raw) => {
                let t = parse_clock_time(raw)?;
                epoch_seconds(self.resolve_same_day(t))
            }
            None => epoch_seconds(self.time.now()),
        };
        self.write(ts)?;
        Ok(ts)
    }

    /// Resolve a wall-clock time against today, rolling back one day when the
    /// result would be in the future.
    pub fn resolve_same_day(&self, t: NaiveTime) -> DateTime<Local> {
        let now = self.time.now();
        let candidate = Local
            .with_ymd_and_hms(now.year(), now.month(), now.day(), 0, 0, 0)
            .single()
            .map(|midnight| midnight + (t - NaiveTime::from_hms_opt(0, 0, 0).unwrap()))
            .unwrap_or(now);
        if candidate > now {
            candidate - chrono::Duration::days(1)
        } else {
            candidate
        }
    }

    /// Persist an explicit epoch timestamp (used when a commit message
    /// carries a `-st` start-time override).
    pub fn set_start_timestamp(&self, ts: f64) -> AppResult<()> {
        self.write(ts)
    }

    /// Elapsed hours since the stored start time, rounded to 2 decimals.
    pub fn hours_since_start(&self) -> AppResult<f64> {
        let start = self.get_start_time()?;
        let seconds = epoch_seconds(self.time.now()) - start;
        Ok(round2(seconds / 3600.0))
    }

    /// The stored start time as a local datetime, for display.
    pub fn start_datetime(&self) -> AppResult<DateTime<Local>> {
        let ts = self.get_start_time()?;
        Local
            .timestamp_opt(ts as i64, 0)
            .single()
            .ok_or_else(|| AppError::Storage {
                path: self.path.display().to_string(),
                reason: format!("start time out of range: {}", ts),
            })
    }

    fn write(&self, ts: f64) -> AppResult<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(&self.path, ts.to_string())?;
        Ok(())
    }
}

pub fn epoch_seconds(dt: DateTime<Local>) -> f64 {
    dt.timestamp_millis() as f64 / 1000.0
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
