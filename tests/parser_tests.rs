mod common;

use common::{epoch, local, test_clock};
use jiralog::core::parser::{extract_comment, CommitParser, DurationRule};
use jiralog::models::Extraction;

fn loggable(e: Extraction) -> jiralog::models::ParsedCommand {
    e.loggable().expect("expected a loggable command")
}

#[test]
fn extracts_ticket_and_hours_flag() {
    let dir = tempfile::tempdir().unwrap();
    let clock = test_clock(&dir, local(2025, 8, 25, 11, 30));
    let parser = CommitParser::new(&clock, 15, 15);

    let cmd = loggable(parser.extract("(AHPM-124 -h 2h) fix").unwrap());
    assert_eq!(cmd.ticket, "AHPM-124");
    assert_eq!(cmd.duration, "2h");
    assert!(!cmd.close);
    assert_eq!(cmd.start, None);
}

#[test]
fn close_flag_is_position_independent() {
    let dir = tempfile::tempdir().unwrap();
    let clock = test_clock(&dir, local(2025, 8, 25, 11, 30));
    let parser = CommitParser::new(&clock, 15, 15);

    for msg in [
        "(AHPM-124 -h 2h -c) fix",
        "(AHPM-124 -c -h 2h) fix",
        "(AHPM-124) fix -h 2h -c",
        "(AHPM-124) fix -c -h 2h",
    ] {
        let cmd = loggable(parser.extract(msg).unwrap());
        assert!(cmd.close, "close flag missed in {:?}", msg);
        assert_eq!(cmd.duration, "2h");
    }
}

#[test]
fn multi_token_hours_flag() {
    let dir = tempfile::tempdir().unwrap();
    let clock = test_clock(&dir, local(2025, 8, 25, 11, 30));
    let parser = CommitParser::new(&clock, 15, 15);

    let cmd = loggable(parser.extract("(AHPM-124 -h 1h 15m) fix").unwrap());
    assert_eq!(cmd.duration, "1h 15m");
}

#[test]
fn legacy_bare_tokens_in_prose() {
    let dir = tempfile::tempdir().unwrap();
    let clock = test_clock(&dir, local(2025, 8, 25, 11, 30));
    let parser = CommitParser::new(&clock, 15, 15);

    let cmd = loggable(parser.extract("(AHPM-124) spent 2h on the login flow").unwrap());
    assert_eq!(cmd.duration, "2h");
}

#[test]
fn zero_duration_is_unloggable() {
    let dir = tempfile::tempdir().unwrap();
    let clock = test_clock(&dir, local(2025, 8, 25, 11, 30));
    let parser = CommitParser::new(&clock, 15, 15);

    assert_eq!(parser.extract("(AHPM-124) fix -h 0h").unwrap(), Extraction::Unloggable);
    assert_eq!(parser.extract("(AHPM-124) fix -h 0h 0m").unwrap(), Extraction::Unloggable);
}

#[test]
fn no_ticket_is_unloggable() {
    let dir = tempfile::tempdir().unwrap();
    let clock = test_clock(&dir, local(2025, 8, 25, 11, 30));
    let parser = CommitParser::new(&clock, 15, 15);

    assert_eq!(parser.extract("random text no ticket").unwrap(), Extraction::Unloggable);
    assert_eq!(parser.extract("(AHPM-124) no duration here").unwrap(), Extraction::Unloggable);
}

#[test]
fn start_override_computes_duration_and_persists_start() {
    let dir = tempfile::tempdir().unwrap();
    let now = local(2025, 8, 25, 11, 30);
    let clock = test_clock(&dir, now);
    let parser = CommitParser::new(&clock, 15, 15);

    let cmd = loggable(parser.extract("(AHPM-124) Updated docs -st 09:30am -c").unwrap());
    assert_eq!(cmd.ticket, "AHPM-124");
    assert_eq!(cmd.duration, "2h");
    assert!(cmd.close);
    assert_eq!(cmd.start, Some(local(2025, 8, 25, 9, 30)));
    // Side effect: the clock now holds the parsed start.
    assert_eq!(clock.get_start_time().unwrap(), epoch(local(2025, 8, 25, 9, 30)));
}

#[test]
fn start_override_beats_hours_flag() {
    let dir = tempfile::tempdir().unwrap();
    let clock = test_clock(&dir, local(2025, 8, 25, 11, 30));
    let parser = CommitParser::new(&clock, 15, 15);

    let cmd = loggable(parser.extract("(AHPM-124) fix -st 10:30am -h 5h").unwrap());
    assert_eq!(cmd.duration, "1h");
}

#[test]
fn auto_uses_stored_start_and_resets_clock() {
    let dir = tempfile::tempdir().unwrap();
    let now = local(2025, 8, 25, 11, 30);
    let clock = test_clock(&dir, now);
    let started = local(2025, 8, 25, 9, 30);
    clock.set_start_timestamp(epoch(started)).unwrap();

    let parser = CommitParser::new(&clock, 15, 15);
    let cmd = loggable(parser.extract("(AHPM-124 -a) fix").unwrap());
    assert_eq!(cmd.duration, "2h");
    assert_eq!(cmd.start, Some(started));
    // Side effect: the clock was reset to now, strictly after the old value.
    let stored = clock.get_start_time().unwrap();
    assert_eq!(stored, epoch(now));
    assert!(stored > epoch(started));
}

#[test]
fn auto_flag_does_not_match_inside_other_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let clock = test_clock(&dir, local(2025, 8, 25, 11, 30));
    let parser = CommitParser::new(&clock, 15, 15);

    // "-at" and "beta-a" must not trigger auto-calculation.
    assert_eq!(
        parser.extract("(AHPM-124) fix -at the office").unwrap(),
        Extraction::Unloggable
    );
    assert_eq!(
        parser.extract("(AHPM-124) tweak beta-a build").unwrap(),
        Extraction::Unloggable
    );
}

#[test]
fn hours_flag_beats_legacy_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let clock = test_clock(&dir, local(2025, 8, 25, 11, 30));
    let parser = CommitParser::new(&clock, 15, 15);

    // The bare "3h" in prose loses to the explicit flag.
    let cmd = loggable(parser.extract("(AHPM-124) took 3h yesterday -h 1h").unwrap());
    assert_eq!(cmd.duration, "1h");
}

#[test]
fn rules_can_be_probed_individually() {
    let dir = tempfile::tempdir().unwrap();
    let clock = test_clock(&dir, local(2025, 8, 25, 11, 30));
    let parser = CommitParser::new(&clock, 15, 15);

    let text = "(AHPM-124) fix -h 2h";
    assert!(parser.apply_rule(DurationRule::StartOverride, text).unwrap().is_none());
    let hit = parser.apply_rule(DurationRule::HoursFlag, text).unwrap().unwrap();
    assert_eq!(hit.duration, "2h");
    assert!(parser.apply_rule(DurationRule::Auto, text).unwrap().is_none());
}

#[test]
fn comment_takes_text_after_closing_paren() {
    assert_eq!(extract_comment("(AHPM-124 -h 2h) Fixed bug in login flow"), "Fixed bug in login flow");
    assert_eq!(extract_comment("no parens at all"), "no parens at all");
}

#[test]
fn comment_strips_trailing_flags() {
    assert_eq!(extract_comment("(AHPM-124) Updated docs -st 12:30pm -c"), "Updated docs");
    assert_eq!(extract_comment("(AHPM-124) Refactored code -h 1h 30m"), "Refactored code");
    assert_eq!(extract_comment("(AHPM-124) Auto log -a -c"), "Auto log");
    assert_eq!(extract_comment("no parens -h 2h"), "no parens");
}
