//! Windowed aggregation over the diagnostic record log
//!
//! Pure functions of the window they are given: identical input always
//! yields identical output, and no record is ever mutated. Determinism is
//! load-bearing here because the dashboard re-renders from these values on
//! every refresh cycle.

use crate::domain::DiagnosticRecord;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Label used when a record carries no disease candidates
pub const UNKNOWN_LABEL: &str = "Unknown";

/// One label with its count in the window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// One calendar day with its record count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCount {
    /// UTC calendar day
    pub day: NaiveDate,
    pub count: usize,
}

/// Aggregates computed from one record window
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregates {
    /// Disease label -> count; counts always sum to the window length
    pub distribution: BTreeMap<String, usize>,

    /// The k most frequent labels; ties broken by ascending label order
    pub top_k: Vec<LabelCount>,

    /// Day-bucketed record counts, ascending; only days with at least one
    /// record appear
    pub time_series: Vec<DayCount>,

    /// Mean outcome probability over the window; `None` when empty
    pub mean_risk: Option<f64>,
}

/// Compute distribution, top-k, time series and mean risk for a window
///
/// The window is the most recent N records ordered by `created_at`
/// descending; ordering does not affect any output.
///
/// # Arguments
///
/// * `window` - Records to aggregate
/// * `k` - Number of labels in the top-k list
pub fn aggregate(window: &[DiagnosticRecord], k: usize) -> Aggregates {
    let mut distribution: BTreeMap<String, usize> = BTreeMap::new();
    let mut days: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    let mut risk_sum = 0.0;

    for record in window {
        let label = record
            .prediction
            .disease
            .primary()
            .map(|c| c.disease.clone())
            .unwrap_or_else(|| UNKNOWN_LABEL.to_string());
        *distribution.entry(label).or_insert(0) += 1;

        *days.entry(record.created_at.date_naive()).or_insert(0) += 1;

        risk_sum += record.prediction.outcome.probability;
    }

    let top_k = top_k_labels(&distribution, k);

    let time_series = days
        .into_iter()
        .map(|(day, count)| DayCount { day, count })
        .collect();

    let mean_risk = if window.is_empty() {
        None
    } else {
        Some(risk_sum / window.len() as f64)
    };

    Aggregates {
        distribution,
        top_k,
        time_series,
        mean_risk,
    }
}

/// The k labels with the highest counts
///
/// Ties break by ascending lexical label order so the result is a total
/// order and reproducible.
fn top_k_labels(distribution: &BTreeMap<String, usize>, k: usize) -> Vec<LabelCount> {
    let mut counts: Vec<LabelCount> = distribution
        .iter()
        .map(|(label, count)| LabelCount {
            label: label.clone(),
            count: *count,
        })
        .collect();

    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    counts.truncate(k);
    counts
}
