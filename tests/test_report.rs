//! Integration tests for the plain-text statistics report.

mod common;

use cardwatch::{aggregate, Reporter, TextReporter};
use std::time::{Duration, Instant};

use common::*;

fn render(snapshot: &StatsSnapshot) -> String {
    let mut reporter = TextReporter::new(Vec::new());
    reporter.render(snapshot);
    String::from_utf8(reporter.into_inner()).expect("report is UTF-8")
}

#[test]
fn test_report_lists_every_category_with_shares() {
    let start = Instant::now();
    let mut stats = SessionStats::starting_at(start);
    let frame = aggregate(vec![
        CardCategory::HeartOrDiamond,
        CardCategory::HeartOrDiamond,
        CardCategory::SpadeOrClub,
    ]);
    stats.record_frame(&frame, start).unwrap();
    stats.record_frame(&aggregate(Vec::new()), start + Duration::from_millis(100)).unwrap();

    let text = render(&stats.snapshot_at(start + Duration::from_millis(2500)));

    assert!(text.contains("Card Detection Statistics - "));
    assert!(text.contains("Session Duration: 2.5 seconds"));
    assert!(text.contains("Frames Processed: 2"));
    assert!(text.contains("Current FPS: 10.0"));
    assert!(text.contains("Total Cards Detected: 3"));
    assert!(text.contains("heart_or_diamond    :     2 ( 66.7%)"));
    assert!(text.contains("spade_or_club       :     1 ( 33.3%)"));
    assert!(text.contains("unknown_card        :     0 (  0.0%)"));
}

#[test]
fn test_report_without_cards() {
    let start = Instant::now();
    let stats = SessionStats::starting_at(start);
    let text = render(&stats.snapshot_at(start));

    assert!(text.contains("No cards detected yet..."));
    assert!(!text.contains("heart_or_diamond"));
}

#[test]
fn test_final_report_heading() {
    let start = Instant::now();
    let mut stats = SessionStats::starting_at(start);
    let text = render(&stats.finalize_at(start));

    assert!(text.contains("Final Statistics - "));
}
