//! End-to-end conflict scenarios starting from backend JSON.

use sitecal_core::{
    cap_conflicts, detect_conflicts, filter_events, parse_events, ConflictDetector,
    DetectionStrategy, ProjectFilter, Severity,
};

fn ids(json: &str) -> Vec<(String, String, Severity)> {
    let events = parse_events(json).unwrap();
    detect_conflicts(&events)
        .iter()
        .map(|c| (c.event_a.id.clone(), c.event_b.id.clone(), c.severity))
        .collect()
}

#[test]
fn test_same_trade_overlap_is_high() {
    let found = ids(r#"[
        {"id": "A", "start_time": "2024-03-01T09:00:00Z", "end_time": "2024-03-01T10:00:00Z",
         "project_id": "P1", "trade": "electrical"},
        {"id": "B", "start_time": "2024-03-01T09:30:00Z", "end_time": "2024-03-01T10:30:00Z",
         "project_id": "P1", "trade": "electrical"}
    ]"#);
    assert_eq!(found, vec![("A".into(), "B".into(), Severity::High)]);
}

#[test]
fn test_touching_events_do_not_conflict() {
    let found = ids(r#"[
        {"id": "A", "start_time": "2024-03-01T09:00:00Z", "end_time": "2024-03-01T10:00:00Z", "project_id": "P1"},
        {"id": "B", "start_time": "2024-03-01T10:00:00Z", "end_time": "2024-03-01T11:00:00Z", "project_id": "P1"}
    ]"#);
    assert!(found.is_empty());
}

#[test]
fn test_cross_project_events_do_not_conflict() {
    let found = ids(r#"[
        {"id": "A", "start_time": "2024-03-01T09:00:00Z", "end_time": "2024-03-01T10:00:00Z", "project_id": "P1"},
        {"id": "B", "start_time": "2024-03-01T09:00:00Z", "end_time": "2024-03-01T10:00:00Z", "project_id": "P2"}
    ]"#);
    assert!(found.is_empty());
}

#[test]
fn test_different_trades_are_medium() {
    let found = ids(r#"[
        {"id": "A", "start_time": "2024-03-01T09:00:00Z", "end_time": "2024-03-01T10:00:00Z",
         "project_id": "P1", "trade": "electrical"},
        {"id": "B", "start_time": "2024-03-01T09:30:00Z", "end_time": "2024-03-01T10:30:00Z",
         "project_id": "P1", "trade": "plumbing"}
    ]"#);
    assert_eq!(found, vec![("A".into(), "B".into(), Severity::Medium)]);
}

#[test]
fn test_three_mutual_overlaps() {
    let found = ids(r#"[
        {"id": "1", "start_time": "2024-03-01T09:00:00Z", "end_time": "2024-03-01T12:00:00Z", "project_id": "P1"},
        {"id": "2", "start_time": "2024-03-01T09:30:00Z", "end_time": "2024-03-01T11:00:00Z", "project_id": "P1"},
        {"id": "3", "start_time": "2024-03-01T10:00:00Z", "end_time": "2024-03-01T10:30:00Z", "project_id": "P1"}
    ]"#);
    let pairs: Vec<(&str, &str)> = found.iter().map(|(a, b, _)| (a.as_str(), b.as_str())).collect();
    assert_eq!(pairs, vec![("1", "2"), ("1", "3"), ("2", "3")]);
}

#[test]
fn test_zero_duration_at_other_start() {
    let found = ids(r#"[
        {"id": "A", "start_time": "2024-03-01T09:00:00Z", "end_time": "2024-03-01T10:00:00Z", "project_id": "P1"},
        {"id": "B", "start_time": "2024-03-01T09:00:00Z", "project_id": "P1"}
    ]"#);
    assert!(found.is_empty());
}

#[test]
fn test_malformed_records_are_skipped_not_fatal() {
    let events = parse_events(r#"[
        {"id": "A", "start_time": "2024-03-01T09:00:00Z", "end_time": "2024-03-01T10:00:00Z", "project_id": "P1"},
        {"id": "bad", "start_time": "soon", "end_time": "2024-03-01T10:00:00Z", "project_id": "P1"},
        {"id": "missing", "project_id": "P1"},
        {"id": "B", "start_time": "2024-03-01T09:30:00Z", "end_time": "garbage", "project_id": "P1"}
    ]"#)
    .unwrap();
    let conflicts = detect_conflicts(&events);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].event_a.id, "A");
    assert_eq!(conflicts[0].event_b.id, "B");
}

#[test]
fn test_filter_then_detect_then_cap() {
    let events = parse_events(r#"[
        {"id": "1", "start_time": "2024-03-01T09:00:00Z", "end_time": "2024-03-01T12:00:00Z", "project_id": "P1"},
        {"id": "x", "start_time": "2024-03-01T09:00:00Z", "end_time": "2024-03-01T12:00:00Z", "project_id": "P2"},
        {"id": "2", "start_time": "2024-03-01T09:30:00Z", "end_time": "2024-03-01T11:00:00Z", "project_id": "P1"},
        {"id": "3", "start_time": "2024-03-01T10:00:00Z", "end_time": "2024-03-01T10:30:00Z", "project_id": "P1"}
    ]"#)
    .unwrap();
    let p1 = filter_events(&events, &ProjectFilter::Project("P1".into()));
    let detector = ConflictDetector::new().with_strategy(DetectionStrategy::Sweep);
    let capped = cap_conflicts(detector.detect(&p1), 2);
    assert_eq!(capped.shown.len(), 2);
    assert_eq!(capped.hidden, 1);
    assert_eq!(capped.shown[0].event_a.id, "1");
    assert_eq!(capped.shown[0].event_b.id, "2");
}

#[test]
fn test_empty_project_id_groups_with_missing_project() {
    let events = parse_events(r#"[
        {"id": "A", "start_time": "2024-03-01T09:00:00Z", "end_time": "2024-03-01T10:00:00Z", "project_id": ""},
        {"id": "B", "start_time": "2024-03-01T09:30:00Z", "end_time": "2024-03-01T10:30:00Z"},
        {"id": "C", "start_time": "2024-03-01T09:30:00Z", "end_time": "2024-03-01T10:30:00Z", "project_id": " "}
    ]"#)
    .unwrap();
    assert!(events[0].project_id.is_none());
    assert_eq!(events[2].project_id.as_deref(), Some(" "));

    let conflicts = detect_conflicts(&events);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].event_a.id, "A");
    assert_eq!(conflicts[0].event_b.id, "B");
}

#[test]
fn test_trailing_space_in_trade_is_a_different_trade() {
    let found = ids(r#"[
        {"id": "A", "start_time": "2024-03-01T09:00:00Z", "end_time": "2024-03-01T10:00:00Z",
         "project_id": "P1", "trade": "electrical "},
        {"id": "B", "start_time": "2024-03-01T09:30:00Z", "end_time": "2024-03-01T10:30:00Z",
         "project_id": "P1", "trade": "electrical"}
    ]"#);
    assert_eq!(found, vec![("A".into(), "B".into(), Severity::Medium)]);
}

#[test]
fn test_reversed_end_uses_raw_interval() {
    let found = ids(r#"[
        {"id": "A", "start_time": "2024-03-01T10:00:00Z", "end_time": "2024-03-01T09:00:00Z", "project_id": "P1"},
        {"id": "B", "start_time": "2024-03-01T09:30:00Z", "end_time": "2024-03-01T11:00:00Z", "project_id": "P1"}
    ]"#);
    assert!(found.is_empty());
}
