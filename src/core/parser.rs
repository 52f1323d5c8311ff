//! Commit-message / command parser.
//!
//! Extracts (ticket, duration, close-flag, start-time) from free-form text
//! supporting several flag spellings and both token orderings:
//!
//! ```text
//! (AHPM-124 -h 2h) Fixed bug in login flow
//! (AHPM-124) Refactored code -h 1h 30m -c
//! (AHPM-124) Updated docs -st 09:30am -c
//! (AHPM-124 -a) Auto-calculated hours since workday start
//! ```
//!
//! Duration sources are evaluated as an ordered list of named rules, first
//! match wins: start-time override, `-h` flag, bare legacy tokens, `-a`
//! auto-calculation. The `-st` and `-a` rules also mutate the workday clock
//! as a side effect (see each rule below).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::clock::{epoch_seconds, WorkdayClock};
use crate::core::duration;
use crate::errors::AppResult;
use crate::models::{Extraction, ParsedCommand};
use chrono::{DateTime, Local, TimeZone};

static TICKET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z]+-\d+)\b").expect("invalid ticket regex"));
static START_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)-st\s+(\d{1,2}:\d{2}\s*(?:[ap]m)?)\b").expect("invalid start regex")
});
static HOURS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)-h\s+((?:\d+[hm])(?:\s+\d+[hm])*)").expect("invalid hours regex")
});
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+h|\d+m").expect("invalid token regex"));
// The regex crate has no look-around; `(^|\W)` keeps `-a` from matching
// inside `beta-a` or `-at`.
static AUTO_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(^|\W)-a\b").expect("invalid auto regex"));
static CLOSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(^|\W)-c\b").expect("invalid close regex"));
static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\)\s*(.*)").expect("invalid comment regex"));
static TRAILING_FLAGS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s+(-st\s+\d{1,2}:\d{2}\s*(?:[ap]m)?|-h\s+[\dhm\s]+|-a)(\s+-c)?\s*$")
        .expect("invalid trailing flags regex")
});

/// The duration rules, in priority order. Each either resolves a duration or
/// skips to the next.
pub const DURATION_RULES: [DurationRule; 4] = [
    DurationRule::StartOverride,
    DurationRule::HoursFlag,
    DurationRule::LegacyTokens,
    DurationRule::Auto,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationRule {
    /// `-st HH:MM[am|pm]`: persists the parsed start into the clock and
    /// derives the duration from now − start, overriding everything else.
    StartOverride,
    /// `-h` followed by a run of `\d+h`/`\d+m` tokens.
    HoursFlag,
    /// Bare `\d+h`/`\d+m` tokens anywhere in the text; skipped entirely when
    /// `-a` is present.
    LegacyTokens,
    /// `-a`: duration since the stored workday start; the stored value
    /// becomes the reported start and the clock resets to now.
    Auto,
}

/// A duration resolved by one rule, with the start time it was computed from
/// when one was involved.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDuration {
    pub duration: String,
    pub start: Option<DateTime<Local>>,
}

pub struct CommitParser<'a> {
    clock: &'a WorkdayClock,
    round_minutes: i64,
    min_log_minutes: i64,
}

impl<'a> CommitParser<'a> {
    pub fn new(clock: &'a WorkdayClock, round_minutes: i64, min_log_minutes: i64) -> Self {
        Self {
            clock,
            round_minutes,
            min_log_minutes,
        }
    }

    /// Scan a commit message or chat command.
    ///
    /// Returns [`Extraction::Unloggable`] when no ticket or no usable
    /// duration is found; the caller skips logging, it is not an error.
    /// A `-st` flag still updates the clock in that case.
    pub fn extract(&self, text: &str) -> AppResult<Extraction> {
        let ticket = TICKET_RE
            .captures(text)
            .map(|c| c[1].to_string());
        let close = CLOSE_RE.is_match(text);

        let mut resolved = None;
        for rule in DURATION_RULES {
            if let Some(hit) = self.apply_rule(rule, text)? {
                resolved = Some(hit);
                break;
            }
        }

        match (ticket, resolved) {
            (Some(ticket), Some(hit)) => Ok(Extraction::Loggable(ParsedCommand {
                ticket,
                duration: hit.duration,
                close,
                start: hit.start,
            })),
            _ => Ok(Extraction::Unloggable),
        }
    }

    /// Apply one duration rule. `Ok(None)` means the rule did not match (or
    /// matched a zero duration) and the next rule should run.
    pub fn apply_rule(&self, rule: DurationRule, text: &str) -> AppResult<Option<ResolvedDuration>> {
        match rule {
            DurationRule::StartOverride => self.rule_start_override(text),
            DurationRule::HoursFlag => self.rule_hours_flag(text),
            DurationRule::LegacyTokens => self.rule_legacy_tokens(text),
            DurationRule::Auto => self.rule_auto(text),
        }
    }

    fn rule_start_override(&self, text: &str) -> AppResult<Option<ResolvedDuration>> {
        let caps = match START_RE.captures(text) {
            Some(c) => c,
            None => return Ok(None),
        };
        let t = crate::utils::parse_clock_time(&caps[1])?;
        let start = self.clock.resolve_same_day(t);
        // Saved immediately so a later auto-calculation counts from here.
        self.clock.set_start_timestamp(epoch_seconds(start))?;

        let elapsed_hours =
            (epoch_seconds(self.clock.now()) - epoch_seconds(start)) / 3600.0;
        Ok(Some(ResolvedDuration {
            duration: self.format(elapsed_hours),
            start: Some(start),
        }))
    }

    fn rule_hours_flag(&self, text: &str) -> AppResult<Option<ResolvedDuration>> {
        let caps = match HOURS_RE.captures(text) {
            Some(c) => c,
            None => return Ok(None),
        };
        let tokens: Vec<&str> = TOKEN_RE.find_iter(&caps[1]).map(|m| m.as_str()).collect();
        let joined = tokens.join(" ");
        if duration::is_zero(&joined) {
            return Ok(None);
        }
        Ok(Some(ResolvedDuration {
            duration: joined,
            start: None,
        }))
    }

    fn rule_legacy_tokens(&self, text: &str) -> AppResult<Option<ResolvedDuration>> {
        if AUTO_RE.is_match(text) {
            return Ok(None);
        }
        let tokens: Vec<&str> = TOKEN_RE.find_iter(text).map(|m| m.as_str()).collect();
        if tokens.is_empty() {
            return Ok(None);
        }
        let joined = tokens.join(" ");
        if duration::is_zero(&joined) {
            return Ok(None);
        }
        Ok(Some(ResolvedDuration {
            duration: joined,
            start: None,
        }))
    }

    fn rule_auto(&self, text: &str) -> AppResult<Option<ResolvedDuration>> {
        if !AUTO_RE.is_match(text) {
            return Ok(None);
        }
        let prev = self.clock.get_start_time()?;
        let elapsed_hours = (epoch_seconds(self.clock.now()) - prev) / 3600.0;
        let start = Local.timestamp_opt(prev as i64, 0).single();
        // Reset so the next auto-calculation counts from this moment.
        self.clock.set_start_time()?;
        Ok(Some(ResolvedDuration {
            duration: self.format(elapsed_hours),
            start,
        }))
    }

    fn format(&self, hours: f64) -> String {
        duration::format_duration(hours, self.round_minutes, self.min_log_minutes)
    }
}

/// Extract the free-text comment: everything after the first `)` (the whole
/// text when there is none), with a single trailing `-st <time>`, `-h
/// <tokens>` or `-a` run, optionally followed by `-c`, stripped from the end.
pub fn extract_comment(text: &str) -> String {
    let comment = COMMENT_RE
        .captures(text)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_else(|| text.trim().to_string());
    TRAILING_FLAGS_RE.replace(&comment, "").trim().to_string()
}
