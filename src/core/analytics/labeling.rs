//! Labeling policy for classifier-quality metrics
//!
//! The historical log carries no verified outcome labels, so metrics are
//! computed against a proxy: the stored risk category stands in for ground
//! truth. That approximation is deliberate and preserved here, but it is
//! isolated behind [`LabelPolicy`] so a source of real outcome labels can
//! be swapped in without touching the metrics pipeline.

use crate::domain::{DiagnosticRecord, RiskLevel};

/// Ground-truth labeling rule for metric computation
///
/// Returns `Some(true)` for a positive label, `Some(false)` for a
/// negative one, and `None` when the record cannot be labeled and must be
/// excluded from metrics.
pub trait LabelPolicy: Send + Sync {
    fn label(&self, record: &DiagnosticRecord) -> Option<bool>;
}

/// Default policy: the predicted risk category is used as the label
///
/// Caveat: this makes the metrics measure the outcome classifier's
/// agreement with its own thresholded risk call, not accuracy against
/// verified outcomes. Dashboards built on it indicate calibration shape,
/// not clinical validity.
#[derive(Debug, Default, Clone, Copy)]
pub struct RiskProxyLabel;

impl LabelPolicy for RiskProxyLabel {
    fn label(&self, record: &DiagnosticRecord) -> Option<bool> {
        Some(record.prediction.outcome.risk == RiskLevel::HighRisk)
    }
}
