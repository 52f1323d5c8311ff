//! Duration normalization and tracker-native duration formatting.
//!
//! The tracker accepts durations as `<N>h <N>m` strings. Free text arrives in
//! many spellings ("2 hours", "90 minutes", "1h 30m"); `normalize` collapses
//! them into the canonical form, and `format_duration` converts float hours
//! into a rounded duration string.

use once_cell::sync::Lazy;
use regex::Regex;

static HOUR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d+)\s*(h|hr|hrs|hour|hours)\b").expect("invalid hour regex"));
static MINUTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d+)\s*(m|min|mins|minute|minutes)\b").expect("invalid minute regex"));
static TOKEN_GAP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+[hm])\s*").expect("invalid token gap regex"));
static ALL_UNITS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+[hm]( \d+[hm])*$").expect("invalid units regex"));

/// Zero-duration spellings treated as "no duration given". The list is
/// intentionally literal; `0h 5m` is a normal non-zero duration.
const ZERO_SENTINELS: [&str; 5] = ["0h", "0m", "0h 0m", "0m 0h", ""];

pub fn is_zero(duration: &str) -> bool {
    ZERO_SENTINELS.contains(&duration.trim())
}

/// Canonicalize a free-text duration expression.
///
/// Hour and minute synonyms are collapsed to `<N>h` / `<N>m` with a single
/// space between tokens; when the whole input is duration tokens they are
/// reordered hours-first. Unrecognized fragments pass through unchanged, so
/// this is best-effort and never fails. Idempotent on canonical input.
pub fn normalize(raw: &str) -> String {
    let s = raw.trim().to_lowercase();
    let s = HOUR_RE.replace_all(&s, "${1}h");
    let s = MINUTE_RE.replace_all(&s, "${1}m");
    let s = TOKEN_GAP_RE.replace_all(&s, "$1 ");
    let s = s.trim().to_string();

    if !ALL_UNITS_RE.is_match(&s) {
        return s;
    }

    // Fully recognized input: hours before minutes, e.g. "30m 1h" -> "1h 30m".
    let (hours, minutes): (Vec<&str>, Vec<&str>) =
        s.split(' ').partition(|tok| tok.ends_with('h'));
    hours
        .into_iter()
        .chain(minutes)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert float hours to a tracker duration string, rounded to the nearest
/// `round_minutes` bracket and clamped to at least `min_minutes`.
/// E.g. 2.5 → `2h 30m`, 0.12 → `15m` with the defaults.
pub fn format_duration(hours: f64, round_minutes: i64, min_minutes: i64) -> String {
    let bracket = round_minutes.max(1);
    let total_minutes = ((hours * 60.0 / bracket as f64).round() as i64 * bracket).max(min_minutes);
    let h = total_minutes / 60;
    let m = total_minutes % 60;
    let mut parts = Vec::new();
    if h > 0 {
        parts.push(format!("{}h", h));
    }
    if m > 0 || h == 0 {
        parts.push(format!("{}m", m));
    }
    parts.join(" ")
}
