//! Windowed analytics
//!
//! Pure computations over record windows: label distribution, top-k
//! diagnoses, day-bucketed volume, mean risk, ROC/AUC and the confusion
//! matrix. Nothing in this module performs I/O or mutates a record.

pub mod aggregate;
pub mod labeling;
pub mod metrics;

pub use aggregate::{aggregate, Aggregates, DayCount, LabelCount, UNKNOWN_LABEL};
pub use labeling::{LabelPolicy, RiskProxyLabel};
pub use metrics::{
    compute_confusion, compute_roc, ConfusionMatrix, Evaluated, RocCurve, DECISION_THRESHOLD,
    MIN_LABELED_PAIRS,
};
