//! Property-style integration tests for windowed aggregation

use chrono::{Duration, TimeZone, Utc};
use clinsight::core::analytics::{aggregate, UNKNOWN_LABEL};
use clinsight::domain::{
    DiagnosticRecord, DiseaseCandidate, DiseaseResult, OutcomeResult, Prediction, RecordId,
    RiskLevel,
};
use fake::faker::name::en::Name;
use fake::Fake;
use test_case::test_case;

fn record(label: Option<&str>, probability: f64, offset_hours: i64) -> DiagnosticRecord {
    let top3 = label
        .map(|l| {
            vec![DiseaseCandidate {
                disease: l.to_string(),
                confidence: 0.9,
            }]
        })
        .unwrap_or_default();

    let base = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let patient_name: String = Name().fake();

    DiagnosticRecord {
        id: RecordId::new(format!("rec-{offset_hours}")).unwrap(),
        patient_name,
        age: (20..90).fake(),
        features: Default::default(),
        prediction: Prediction {
            disease: DiseaseResult { top3 },
            outcome: OutcomeResult {
                risk: if probability >= 0.5 {
                    RiskLevel::HighRisk
                } else {
                    RiskLevel::LowRisk
                },
                probability,
            },
        },
        created_at: base + Duration::hours(offset_hours),
        created_by: None,
    }
}

/// Deterministic pseudo-random window: label cycle plus some unlabeled
/// records
fn synthetic_window(len: usize) -> Vec<DiagnosticRecord> {
    let labels = ["Flu", "Cold", "Asthma", "Migraine"];
    (0..len)
        .map(|i| {
            let label = if i % 7 == 0 {
                None
            } else {
                Some(labels[i % labels.len()])
            };
            record(label, (i % 10) as f64 / 10.0, i as i64)
        })
        .collect()
}

#[test_case(0; "empty window")]
#[test_case(1; "single record")]
#[test_case(13; "small window")]
#[test_case(200; "feed window")]
#[test_case(1000; "admin window")]
fn test_distribution_sums_to_window_length(len: usize) {
    let window = synthetic_window(len);
    let aggregates = aggregate(&window, 5);
    let total: usize = aggregates.distribution.values().sum();
    assert_eq!(total, len);
}

#[test]
fn test_unlabeled_records_counted_as_unknown() {
    let window = synthetic_window(14);
    let aggregates = aggregate(&window, 5);
    assert_eq!(aggregates.distribution[UNKNOWN_LABEL], 2);
}

#[test]
fn test_aggregate_idempotent_and_order_invariant() {
    let mut window = synthetic_window(50);

    let first = aggregate(&window, 3);
    let second = aggregate(&window, 3);
    assert_eq!(first, second);

    window.reverse();
    let reversed = aggregate(&window, 3);
    assert_eq!(first, reversed);
}

#[test]
fn test_aggregate_does_not_mutate_window() {
    let window = synthetic_window(20);
    let snapshot = window.clone();
    let _ = aggregate(&window, 3);
    assert_eq!(window, snapshot);
}

#[test]
fn test_top_k_equal_counts_break_ties_lexically() {
    // One record per label: every count is 1, so order is purely lexical
    let window = vec![
        record(Some("Migraine"), 0.2, 0),
        record(Some("Asthma"), 0.2, 1),
        record(Some("Flu"), 0.2, 2),
        record(Some("Cold"), 0.2, 3),
    ];

    let aggregates = aggregate(&window, 4);
    let labels: Vec<&str> = aggregates.top_k.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["Asthma", "Cold", "Flu", "Migraine"]);
}

#[test]
fn test_top_k_truncates_to_k() {
    let window = synthetic_window(40);
    let aggregates = aggregate(&window, 2);
    assert_eq!(aggregates.top_k.len(), 2);
    assert!(aggregates.top_k[0].count >= aggregates.top_k[1].count);
}

#[test]
fn test_time_series_days_ascending_and_complete() {
    let window = synthetic_window(60);
    let aggregates = aggregate(&window, 3);

    // Days strictly ascending
    for pair in aggregates.time_series.windows(2) {
        assert!(pair[0].day < pair[1].day);
    }

    // Bucket counts also sum to the window length, and no zero-count
    // days are synthesized
    let total: usize = aggregates.time_series.iter().map(|d| d.count).sum();
    assert_eq!(total, window.len());
    assert!(aggregates.time_series.iter().all(|d| d.count > 0));
}

#[test]
fn test_mean_risk_stays_within_unit_interval() {
    let window = synthetic_window(31);
    let mean = aggregate(&window, 3).mean_risk.unwrap();
    assert!((0.0..=1.0).contains(&mean));
}
