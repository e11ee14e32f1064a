//! Classifier-quality metrics over historical records
//!
//! ROC curve with trapezoidal AUC and a 2x2 confusion matrix, computed
//! from labeled (probability, outcome) pairs extracted from a record
//! window. Both computations are pure functions of the window, invariant
//! to record order, and return [`Evaluated::Skipped`] rather than an
//! error when the window cannot support them - callers render no chart
//! instead of a stale one.

use crate::core::analytics::labeling::LabelPolicy;
use crate::domain::DiagnosticRecord;
use std::cmp::Ordering;

/// A metric needs strictly more labeled pairs than this to be computed
pub const MIN_LABELED_PAIRS: usize = 10;

/// Decision threshold for the confusion matrix
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Outcome of a metric computation
///
/// `Skipped` is not an error: it means the window holds too few labeled
/// pairs (or only one class) and the corresponding view must show an
/// explicit "not enough data" state.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluated<T> {
    Computed(T),
    Skipped,
}

impl<T> Evaluated<T> {
    /// The computed value, if any
    pub fn computed(self) -> Option<T> {
        match self {
            Evaluated::Computed(value) => Some(value),
            Evaluated::Skipped => None,
        }
    }

    /// True when the computation was skipped
    pub fn is_skipped(&self) -> bool {
        matches!(self, Evaluated::Skipped)
    }
}

/// ROC curve points and area under the curve
#[derive(Debug, Clone, PartialEq)]
pub struct RocCurve {
    /// False-positive rates, ascending from 0.0 to 1.0
    pub fpr: Vec<f64>,

    /// True-positive rates, parallel to `fpr`
    pub tpr: Vec<f64>,

    /// Area under the (fpr, tpr) polyline, within [0, 1]
    pub auc: f64,
}

/// 2x2 confusion matrix indexed `[actual][predicted]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfusionMatrix {
    cells: [[usize; 2]; 2],
}

impl ConfusionMatrix {
    /// Count for one (actual, predicted) cell
    pub fn count(&self, actual: bool, predicted: bool) -> usize {
        self.cells[usize::from(actual)][usize::from(predicted)]
    }

    /// All cells, indexed `[actual][predicted]`
    pub fn cells(&self) -> [[usize; 2]; 2] {
        self.cells
    }

    /// Total number of labeled pairs counted
    pub fn total(&self) -> usize {
        self.cells.iter().flatten().sum()
    }

    pub fn true_positives(&self) -> usize {
        self.count(true, true)
    }

    pub fn false_positives(&self) -> usize {
        self.count(false, true)
    }

    pub fn true_negatives(&self) -> usize {
        self.count(false, false)
    }

    pub fn false_negatives(&self) -> usize {
        self.count(true, false)
    }
}

/// Extract labeled (probability, label) pairs from a window
///
/// A record contributes a pair when its outcome probability is finite and
/// the policy can label it. Everything else is excluded.
pub fn labeled_pairs(
    window: &[DiagnosticRecord],
    policy: &dyn LabelPolicy,
) -> Vec<(f64, bool)> {
    window
        .iter()
        .filter_map(|record| {
            let probability = record.prediction.outcome.probability;
            if !probability.is_finite() {
                return None;
            }
            policy.label(record).map(|label| (probability, label))
        })
        .collect()
}

/// Compute the ROC curve and AUC for a window
///
/// Pairs are sorted by descending probability and swept from the highest
/// threshold down; ties at equal probability collapse into one point.
/// `tpr = TP/P` and `fpr = FP/N` at each distinct probability, with the
/// curve anchored at (0, 0) and (1, 1).
///
/// Returns `Skipped` when the window has 10 or fewer labeled pairs, or
/// when all pairs carry the same label (rates undefined).
pub fn compute_roc(
    window: &[DiagnosticRecord],
    policy: &dyn LabelPolicy,
) -> Evaluated<RocCurve> {
    let mut pairs = labeled_pairs(window, policy);

    if pairs.len() <= MIN_LABELED_PAIRS {
        tracing::debug!(
            labeled_pairs = pairs.len(),
            required = MIN_LABELED_PAIRS + 1,
            "Skipping ROC: not enough labeled pairs"
        );
        return Evaluated::Skipped;
    }

    let positives = pairs.iter().filter(|(_, label)| *label).count();
    let negatives = pairs.len() - positives;
    if positives == 0 || negatives == 0 {
        tracing::debug!(
            positives = positives,
            negatives = negatives,
            "Skipping ROC: window is single-class"
        );
        return Evaluated::Skipped;
    }

    pairs.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    let mut fpr = vec![0.0];
    let mut tpr = vec![0.0];
    let mut true_positives = 0usize;
    let mut false_positives = 0usize;

    let mut i = 0;
    while i < pairs.len() {
        let threshold = pairs[i].0;
        // Consume the whole tie group before emitting a point
        while i < pairs.len() && pairs[i].0 == threshold {
            if pairs[i].1 {
                true_positives += 1;
            } else {
                false_positives += 1;
            }
            i += 1;
        }
        fpr.push(false_positives as f64 / negatives as f64);
        tpr.push(true_positives as f64 / positives as f64);
    }

    let auc = trapezoid_area(&fpr, &tpr);
    Evaluated::Computed(RocCurve { fpr, tpr, auc })
}

/// Compute the confusion matrix for a window at the given threshold
///
/// `predicted = 1` iff `probability >= threshold`; the matrix is indexed
/// `[actual][predicted]` and its cells always sum to the number of
/// labeled pairs.
///
/// Returns `Skipped` when the window has 10 or fewer labeled pairs.
pub fn compute_confusion(
    window: &[DiagnosticRecord],
    policy: &dyn LabelPolicy,
    threshold: f64,
) -> Evaluated<ConfusionMatrix> {
    let pairs = labeled_pairs(window, policy);

    if pairs.len() <= MIN_LABELED_PAIRS {
        tracing::debug!(
            labeled_pairs = pairs.len(),
            required = MIN_LABELED_PAIRS + 1,
            "Skipping confusion matrix: not enough labeled pairs"
        );
        return Evaluated::Skipped;
    }

    let mut matrix = ConfusionMatrix::default();
    for (probability, actual) in pairs {
        let predicted = probability >= threshold;
        matrix.cells[usize::from(actual)][usize::from(predicted)] += 1;
    }

    Evaluated::Computed(matrix)
}

/// Trapezoidal-rule area under a polyline
fn trapezoid_area(x: &[f64], y: &[f64]) -> f64 {
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| (xs[1] - xs[0]) * (ys[0] + ys[1]) / 2.0)
        .sum()
}
