use super::*;
use pretty_assertions::assert_eq;

fn at(offset: usize) -> Position {
    Position {
        offset,
        line: 1,
        column: offset + 1,
    }
}

fn pattern(expr: &str) -> Expectation {
    Expectation::Pattern(expr.to_owned())
}

#[test]
fn test_empty_tracker() {
    let tracker = ErrorTracker::new();
    assert!(tracker.is_empty());
    assert!(tracker.furthest().is_none());
}

#[test]
fn test_furthest_wins_regardless_of_order() {
    let mut tracker = ErrorTracker::new();
    for offset in [3, 7, 5] {
        tracker.record(at(offset), pattern("x"), None, Some("?".into()));
    }
    assert_eq!(tracker.len(), 3);
    assert_eq!(tracker.furthest().map(|r| r.position.offset), Some(7));
}

#[test]
fn test_same_offset_merges_expectations() {
    let mut tracker = ErrorTracker::new();
    tracker.record(at(2), pattern("a"), None, Some("c".into()));
    tracker.record(at(2), pattern("b"), None, Some("c".into()));
    tracker.record(at(2), pattern("a"), None, Some("c".into()));
    assert_eq!(tracker.len(), 1);
    assert_eq!(
        tracker.at(2).map(FailureRecord::message).as_deref(),
        Some("expected `a` or `b`, found `c`")
    );
}

#[test]
fn test_three_expectations_use_commas() {
    let mut tracker = ErrorTracker::new();
    for expr in ["a", "b", "c"] {
        tracker.record(at(0), pattern(expr), None, Some("z".into()));
    }
    assert_eq!(
        tracker.at(0).map(FailureRecord::message).as_deref(),
        Some("expected `a`, `b` or `c`, found `z`")
    );
}

#[test]
fn test_custom_message_replaces() {
    let mut tracker = ErrorTracker::new();
    tracker.record(at(1), pattern("a"), Some("first".into()), None);
    tracker.record(at(1), pattern("b"), Some("second".into()), None);
    assert_eq!(
        tracker.at(1).map(FailureRecord::message).as_deref(),
        Some("second")
    );
}

#[test]
fn test_end_of_input_found() {
    let mut tracker = ErrorTracker::new();
    tracker.record(at(4), Expectation::Literal(")".into()), None, None);
    assert_eq!(
        tracker.furthest().map(FailureRecord::message).as_deref(),
        Some("expected \")\", found end of input")
    );
}

#[test]
fn test_relabel_keeps_earlier_expectations() {
    let mut tracker = ErrorTracker::new();
    tracker.record(at(0), pattern("x"), None, Some("q".into()));
    tracker.record(at(0), pattern("[0-9]"), None, Some("q".into()));
    tracker.record(at(0), pattern("-"), None, Some("q".into()));
    tracker.relabel(0, 1, Expectation::Rule("number".into()));
    assert_eq!(
        tracker.at(0).map(FailureRecord::message).as_deref(),
        Some("expected `x` or number, found `q`")
    );
}

#[test]
fn test_relabel_missing_offset_is_noop() {
    let mut tracker = ErrorTracker::new();
    tracker.relabel(9, 0, Expectation::Rule("number".into()));
    assert!(tracker.is_empty());
}

#[test]
fn test_shallower_failure_does_not_move_furthest() {
    let mut tracker = ErrorTracker::new();
    tracker.record(at(6), pattern("a"), None, Some("b".into()));
    tracker.record(at(1), pattern("c"), None, Some("d".into()));
    assert_eq!(tracker.furthest().map(|r| r.position.offset), Some(6));
}
