use jiralog::core::duration::{format_duration, is_zero, normalize};

#[test]
fn normalizes_hour_synonyms() {
    assert_eq!(normalize("2 hours"), "2h");
    assert_eq!(normalize("2hr"), "2h");
    assert_eq!(normalize("2 hrs"), "2h");
    assert_eq!(normalize("2 h"), "2h");
}

#[test]
fn normalizes_minute_synonyms() {
    assert_eq!(normalize("90 minutes"), "90m");
    assert_eq!(normalize("30min"), "30m");
    assert_eq!(normalize("30 mins"), "30m");
    assert_eq!(normalize("30 m"), "30m");
}

#[test]
fn normalizes_combinations() {
    assert_eq!(normalize("2 hours 30 min"), "2h 30m");
    assert_eq!(normalize("1 hour 30 min"), "1h 30m");
    assert_eq!(normalize("1h15m"), "1h 15m");
    assert_eq!(normalize("30m 1h"), "1h 30m");
}

#[test]
fn normalize_is_idempotent_on_canonical_input() {
    for d in ["2h", "45m", "1h 30m", "2h 30m", "90m"] {
        assert_eq!(normalize(d), d);
        assert_eq!(normalize(&normalize(d)), normalize(d));
    }
}

#[test]
fn normalize_passes_unrecognized_input_through() {
    assert_eq!(normalize("soonish"), "soonish");
    assert_eq!(normalize(""), "");
}

#[test]
fn zero_sentinels_are_literal() {
    assert!(is_zero("0h"));
    assert!(is_zero("0m"));
    assert!(is_zero("0h 0m"));
    assert!(is_zero("0m 0h"));
    assert!(is_zero(""));
    assert!(is_zero("  0h  "));
    // Non-zero mixed values are kept.
    assert!(!is_zero("0h 5m"));
    assert!(!is_zero("1h"));
}

#[test]
fn format_rounds_to_bracket_with_minimum() {
    assert_eq!(format_duration(2.5, 15, 15), "2h 30m");
    assert_eq!(format_duration(0.75, 15, 15), "45m");
    // 7 minutes rounds down to 0, then the minimum kicks in.
    assert_eq!(format_duration(7.0 / 60.0, 15, 15), "15m");
    assert_eq!(format_duration(22.0 / 60.0, 15, 15), "15m");
    assert_eq!(format_duration(37.0 / 60.0, 15, 15), "30m");
    assert_eq!(format_duration(38.0 / 60.0, 15, 15), "45m");
    assert_eq!(format_duration(2.0, 15, 15), "2h");
}

#[test]
fn format_honors_custom_granularity() {
    assert_eq!(format_duration(0.1, 30, 30), "30m");
    assert_eq!(format_duration(1.4, 30, 30), "1h 30m");
}
