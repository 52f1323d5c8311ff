//! Time utilities: parsing HH:MM and HH:MMam/pm wall-clock times.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;

static AMPM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2}):(\d{2})\s*([ap]m)$").expect("invalid am/pm regex"));

/// Parse a 24-hour `HH:MM` string.
pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

/// Parse a wall-clock time in either `HH:MM` (24h) or `HH:MMam`/`HH:MMpm` form.
pub fn parse_clock_time(input: &str) -> AppResult<NaiveTime> {
    let s = input.trim().to_lowercase();

    if let Some(t) = parse_time(&s) {
        return Ok(t);
    }

    let caps = AMPM_RE
        .captures(&s)
        .ok_or_else(|| AppError::InvalidTime(input.to_string()))?;
    let mut hour: u32 = caps[1].parse().map_err(|_| AppError::InvalidTime(input.to_string()))?;
    let minute: u32 = caps[2].parse().map_err(|_| AppError::InvalidTime(input.to_string()))?;
    match &caps[3] {
        "pm" if hour != 12 => hour += 12,
        "am" if hour == 12 => hour = 0,
        _ => {}
    }

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| AppError::InvalidTime(input.to_string()))
}
