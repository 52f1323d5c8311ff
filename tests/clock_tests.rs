mod common;

use common::{epoch, local, test_clock};
use jiralog::errors::AppError;
use std::fs;

#[test]
fn first_read_creates_start_time_set_to_now() {
    let dir = tempfile::tempdir().unwrap();
    let now = local(2025, 8, 25, 10, 0);
    let clock = test_clock(&dir, now);

    let ts = clock.get_start_time().unwrap();
    assert_eq!(ts, epoch(now));
    // The value is persisted, not just returned.
    let stored: f64 = fs::read_to_string(dir.path().join("start_time"))
        .unwrap()
        .trim()
        .parse()
        .unwrap();
    assert_eq!(stored, ts);
}

#[test]
fn read_returns_stored_value_same_day() {
    let dir = tempfile::tempdir().unwrap();
    let saved = local(2025, 8, 25, 9, 0);
    let now = local(2025, 8, 25, 17, 30);

    test_clock(&dir, saved).set_start_time().unwrap();
    let clock = test_clock(&dir, now);
    assert_eq!(clock.get_start_time().unwrap(), epoch(saved));
}

#[test]
fn stale_value_resets_after_cutoff() {
    let dir = tempfile::tempdir().unwrap();
    let yesterday_2300 = local(2025, 8, 24, 23, 0);
    let today_0700 = local(2025, 8, 25, 7, 0);

    test_clock(&dir, yesterday_2300).set_start_time().unwrap();
    let clock = test_clock(&dir, today_0700);
    let ts = clock.get_start_time().unwrap();
    assert!((ts - epoch(today_0700)).abs() < 1.0);
}

#[test]
fn stale_value_survives_before_cutoff() {
    let dir = tempfile::tempdir().unwrap();
    let yesterday_2300 = local(2025, 8, 24, 23, 0);
    let today_0500 = local(2025, 8, 25, 5, 0);

    test_clock(&dir, yesterday_2300).set_start_time().unwrap();
    let clock = test_clock(&dir, today_0500);
    assert_eq!(clock.get_start_time().unwrap(), epoch(yesterday_2300));
}

#[test]
fn manual_time_in_the_past_is_today() {
    let dir = tempfile::tempdir().unwrap();
    let now = local(2025, 8, 25, 11, 0);
    let clock = test_clock(&dir, now);

    let ts = clock.set_start_time_manual(Some("09:30am")).unwrap();
    assert_eq!(ts, epoch(local(2025, 8, 25, 9, 30)));
}

#[test]
fn manual_time_in_the_future_rolls_back_one_day() {
    let dir = tempfile::tempdir().unwrap();
    let now = local(2025, 8, 25, 8, 0);
    let clock = test_clock(&dir, now);

    let ts = clock.set_start_time_manual(Some("09:30am")).unwrap();
    assert_eq!(ts, epoch(local(2025, 8, 24, 9, 30)));
}

#[test]
fn manual_accepts_24h_format() {
    let dir = tempfile::tempdir().unwrap();
    let now = local(2025, 8, 25, 18, 0);
    let clock = test_clock(&dir, now);

    let ts = clock.set_start_time_manual(Some("14:15")).unwrap();
    assert_eq!(ts, epoch(local(2025, 8, 25, 14, 15)));
}

#[test]
fn manual_without_time_sets_now() {
    let dir = tempfile::tempdir().unwrap();
    let now = local(2025, 8, 25, 18, 0);
    let clock = test_clock(&dir, now);

    let ts = clock.set_start_time_manual(None).unwrap();
    assert_eq!(ts, epoch(now));
}

#[test]
fn manual_rejects_garbage_without_mutating_state() {
    let dir = tempfile::tempdir().unwrap();
    let saved = local(2025, 8, 25, 9, 0);
    let now = local(2025, 8, 25, 12, 0);

    test_clock(&dir, saved).set_start_time().unwrap();
    let clock = test_clock(&dir, now);
    let err = clock.set_start_time_manual(Some("quarter past nine")).unwrap_err();
    assert!(matches!(err, AppError::InvalidTime(_)));
    assert_eq!(clock.get_start_time().unwrap(), epoch(saved));
}

#[test]
fn hours_since_start_rounds_to_two_decimals() {
    let dir = tempfile::tempdir().unwrap();
    let saved = local(2025, 8, 25, 9, 0);
    let now = local(2025, 8, 25, 11, 20);

    test_clock(&dir, saved).set_start_time().unwrap();
    let clock = test_clock(&dir, now);
    assert_eq!(clock.hours_since_start().unwrap(), 2.33);
}

#[test]
fn corrupt_store_is_a_fatal_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("start_time"), "not a number").unwrap();
    let clock = test_clock(&dir, local(2025, 8, 25, 10, 0));
    assert!(matches!(
        clock.get_start_time().unwrap_err(),
        AppError::Storage { .. }
    ));
}
