use chrono::NaiveDate;

use crate::errors::{AppError, AppResult};

/// Parse a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(format!("Invalid date format: '{}' (expected YYYY-MM-DD)", s)))
}

pub fn format_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}
