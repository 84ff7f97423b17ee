//! Tests for parsing statistics

use crate::app::services::obs_parser::stats::ParseStats;

#[test]
fn test_empty_stats() {
    let stats = ParseStats::new();
    assert_eq!(stats.total_records, 0);
    assert_eq!(stats.success_rate(), 0.0);
    assert!(!stats.is_successful());
}

#[test]
fn test_success_rate_calculation() {
    let stats = ParseStats {
        total_records: 4,
        observations_parsed: 3,
        records_skipped: 1,
        errors: vec!["Record 2: bad timestamp".to_string()],
    };
    assert_eq!(stats.success_rate(), 75.0);
    assert!(!stats.is_successful());
}

#[test]
fn test_is_successful_threshold() {
    let stats = ParseStats {
        total_records: 100,
        observations_parsed: 91,
        records_skipped: 9,
        errors: Vec::new(),
    };
    assert!(stats.is_successful());

    let stats = ParseStats {
        total_records: 100,
        observations_parsed: 90,
        records_skipped: 10,
        errors: Vec::new(),
    };
    assert!(!stats.is_successful());
}
