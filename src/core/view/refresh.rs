//! Refresh scheduler
//!
//! Drives every recomputation of the dashboard: on sign-in, after a
//! successful submission, and on a fixed timer while signed in. Cycles
//! are single-flight - a trigger that arrives while a refresh is running
//! is suppressed, not queued, because it would recompute the same window.
//! Store failures during a cycle are logged and leave the previously
//! rendered views untouched.

use crate::adapters::chart::{ChartRenderer, ChartSeries};
use crate::adapters::prediction::PredictionClient;
use crate::adapters::store::RecordStore;
use crate::config::DashboardConfig;
use crate::core::analytics::{
    aggregate, compute_confusion, compute_roc, Aggregates, Evaluated, LabelPolicy,
    DECISION_THRESHOLD,
};
use crate::core::view::gate::RoleGate;
use crate::core::view::slots::{ViewSlot, ViewSlots};
use crate::domain::{ClinsightError, Result, UserId};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// What caused a refresh cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// Authentication state became "signed in"
    SignedIn,
    /// A submission was persisted
    Submission,
    /// The periodic timer fired
    Timer,
}

struct Session {
    user: Option<UserId>,
    timer: Option<JoinHandle<()>>,
}

/// Serialized driver of aggregation, metrics and rendering
pub struct RefreshScheduler {
    store: Arc<dyn RecordStore>,
    gate: RoleGate,
    predictions: Arc<PredictionClient>,
    renderer: Arc<dyn ChartRenderer>,
    policy: Arc<dyn LabelPolicy>,
    dashboard: DashboardConfig,
    refreshing: AtomicBool,
    session: Mutex<Session>,
    slots: Mutex<ViewSlots>,
}

impl RefreshScheduler {
    /// Create a scheduler over the given collaborators
    pub fn new(
        store: Arc<dyn RecordStore>,
        gate: RoleGate,
        predictions: Arc<PredictionClient>,
        renderer: Arc<dyn ChartRenderer>,
        policy: Arc<dyn LabelPolicy>,
        dashboard: DashboardConfig,
    ) -> Self {
        Self {
            store,
            gate,
            predictions,
            renderer,
            policy,
            dashboard,
            refreshing: AtomicBool::new(false),
            session: Mutex::new(Session {
                user: None,
                timer: None,
            }),
            slots: Mutex::new(ViewSlots::new()),
        }
    }

    /// Handle the session becoming signed in
    ///
    /// Registers the periodic trigger idempotently - any prior timer for
    /// the session is cancelled first, so repeated auth-state transitions
    /// never accumulate timers - then runs an immediate refresh.
    pub async fn on_signed_in(self: &Arc<Self>, user: UserId) {
        {
            let mut session = self.session.lock().expect("session mutex poisoned");
            if let Some(timer) = session.timer.take() {
                timer.abort();
            }
            session.user = Some(user.clone());

            let scheduler = Arc::clone(self);
            let period = Duration::from_secs(self.dashboard.refresh_interval_seconds);
            session.timer = Some(tokio::spawn(async move {
                let start = tokio::time::Instant::now() + period;
                let mut interval = tokio::time::interval_at(start, period);
                loop {
                    interval.tick().await;
                    scheduler.trigger(RefreshTrigger::Timer).await;
                }
            }));
        }

        tracing::info!(user_id = %user, "Session signed in");
        self.trigger(RefreshTrigger::SignedIn).await;
    }

    /// Handle the session signing out
    ///
    /// Cancels the periodic trigger and releases every chart handle.
    pub async fn on_signed_out(&self) {
        let mut session = self.session.lock().expect("session mutex poisoned");
        if let Some(timer) = session.timer.take() {
            timer.abort();
        }
        session.user = None;
        drop(session);

        self.slots.lock().expect("slots mutex poisoned").release_all();
        tracing::info!("Session signed out");
    }

    /// Run one refresh cycle unless one is already in progress
    ///
    /// Returns `true` when a cycle actually executed. A suppressed
    /// trigger is not queued; the running cycle already covers the same
    /// window.
    pub async fn trigger(&self, trigger: RefreshTrigger) -> bool {
        if self
            .refreshing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!(trigger = ?trigger, "Refresh in progress; suppressing trigger");
            return false;
        }

        tracing::debug!(trigger = ?trigger, "Refresh cycle starting");
        let result = self.run_cycle().await;
        self.refreshing.store(false, Ordering::SeqCst);

        if let Err(e) = result {
            tracing::warn!(
                trigger = ?trigger,
                error = %e,
                "Refresh failed; previously rendered views retained"
            );
        }
        true
    }

    /// True when a view currently holds a live chart
    pub fn is_rendered(&self, slot: ViewSlot) -> bool {
        self.slots.lock().expect("slots mutex poisoned").is_rendered(slot)
    }

    async fn run_cycle(&self) -> Result<()> {
        let user = {
            let session = self.session.lock().expect("session mutex poisoned");
            session.user.clone()
        };
        let Some(user) = user else {
            tracing::debug!("No signed-in session; skipping refresh");
            return Ok(());
        };

        // Dashboard views for every role
        let feed = self
            .store
            .recent_records(self.dashboard.feed_window)
            .await
            .map_err(|e| ClinsightError::Refresh(format!("Feed window query failed: {e}")))?;
        let feed_aggregates = aggregate(&feed, self.dashboard.top_k);
        self.render_distribution(&feed_aggregates)?;

        // The gate runs before the admin-scale query so non-admins never
        // trigger it
        if !self.gate.is_admin(&user).await {
            return Ok(());
        }

        let window = self
            .store
            .recent_records(self.dashboard.admin_window)
            .await
            .map_err(|e| ClinsightError::Refresh(format!("Admin window query failed: {e}")))?;
        let admin_aggregates = aggregate(&window, self.dashboard.top_k);

        self.render_admin_aggregates(&admin_aggregates)?;
        self.render_metrics(&window)?;
        self.render_feature_importance().await;

        Ok(())
    }

    fn render_distribution(&self, aggregates: &Aggregates) -> Result<()> {
        let series = ChartSeries::new(
            "Disease distribution",
            aggregates
                .distribution
                .iter()
                .map(|(label, count)| (label.clone(), *count as f64)),
        );
        self.render_into(ViewSlot::Distribution, series)
    }

    fn render_admin_aggregates(&self, aggregates: &Aggregates) -> Result<()> {
        let top = ChartSeries::new(
            "Top diagnoses",
            aggregates
                .top_k
                .iter()
                .map(|entry| (entry.label.clone(), entry.count as f64)),
        );
        self.render_into(ViewSlot::TopDiagnoses, top)?;

        let volume = ChartSeries::new(
            "Records per day",
            aggregates
                .time_series
                .iter()
                .map(|entry| (entry.day.to_string(), entry.count as f64)),
        );
        self.render_into(ViewSlot::TimeSeries, volume)?;

        match aggregates.mean_risk {
            Some(mean) => {
                let series =
                    ChartSeries::new("Mean risk", vec![("mean_risk".to_string(), mean)]);
                self.render_into(ViewSlot::MeanRisk, series)?;
            }
            None => self.release_slot(ViewSlot::MeanRisk),
        }

        Ok(())
    }

    fn render_metrics(&self, window: &[crate::domain::DiagnosticRecord]) -> Result<()> {
        // A skipped metric must show "not enough data", never a stale chart
        match compute_roc(window, self.policy.as_ref()) {
            Evaluated::Computed(curve) => {
                let series = ChartSeries::new(
                    format!("ROC (AUC {:.3})", curve.auc),
                    curve
                        .fpr
                        .iter()
                        .zip(curve.tpr.iter())
                        .map(|(fpr, tpr)| (format!("{fpr:.3}"), *tpr)),
                );
                self.render_into(ViewSlot::Roc, series)?;
            }
            Evaluated::Skipped => self.release_slot(ViewSlot::Roc),
        }

        match compute_confusion(window, self.policy.as_ref(), DECISION_THRESHOLD) {
            Evaluated::Computed(matrix) => {
                let series = ChartSeries::new(
                    "Confusion matrix",
                    vec![
                        ("TN".to_string(), matrix.true_negatives() as f64),
                        ("FP".to_string(), matrix.false_positives() as f64),
                        ("FN".to_string(), matrix.false_negatives() as f64),
                        ("TP".to_string(), matrix.true_positives() as f64),
                    ],
                );
                self.render_into(ViewSlot::Confusion, series)?;
            }
            Evaluated::Skipped => self.release_slot(ViewSlot::Confusion),
        }

        Ok(())
    }

    async fn render_feature_importance(&self) {
        match self.predictions.feature_importance().await {
            Ok(importances) if !importances.is_empty() => {
                let series = ChartSeries::new(
                    "Feature importance",
                    importances
                        .into_iter()
                        .map(|entry| (entry.feature, entry.importance)),
                );
                if let Err(e) = self.render_into(ViewSlot::FeatureImportance, series) {
                    tracing::warn!(error = %e, "Failed to render feature importance");
                }
            }
            Ok(_) => self.release_slot(ViewSlot::FeatureImportance),
            Err(e) => {
                // Network failure: keep the previous chart
                tracing::warn!(
                    error = %e,
                    "Feature importance unavailable; previous chart retained"
                );
            }
        }
    }

    fn render_into(&self, slot: ViewSlot, series: ChartSeries) -> Result<()> {
        let mut slots = self.slots.lock().expect("slots mutex poisoned");
        // Destroy-before-create: the old instance is gone before the
        // renderer paints into the same container
        slots.release(slot);
        let handle = self.renderer.render(slot.container_id(), &series)?;
        slots.assign(slot, handle);
        Ok(())
    }

    fn release_slot(&self, slot: ViewSlot) {
        self.slots.lock().expect("slots mutex poisoned").release(slot);
    }
}
