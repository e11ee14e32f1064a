//! Ingestion gateway
//!
//! The single entry point for new clinical submissions. A submission is
//! normalized, classified twice (disease and outcome) against the same
//! payload, persisted as one immutable record, mirrored to the metrics
//! sink, and finally surfaced to the dashboard through a refresh trigger.
//!
//! Both prediction calls must succeed before anything is persisted; a
//! failed call aborts the submission with no partial record. The metrics
//! emission is fire-and-forget and its failure is only reported.

use crate::adapters::prediction::PredictionClient;
use crate::adapters::store::RecordStore;
use crate::core::view::{RefreshScheduler, RefreshTrigger};
use crate::domain::{
    ClinicalPayload, DiagnosticRecord, NewDiagnosticRecord, NewPatientProfile, PatientProfile,
    Result, UserId,
};
use crate::logging::MetricsSink;
use serde_json::json;
use std::sync::Arc;

/// One clinical submission
#[derive(Debug, Clone)]
pub struct Submission {
    /// Patient display name; defaults to "Unknown" when absent
    pub patient_name: Option<String>,

    /// Normalized clinical payload
    pub payload: ClinicalPayload,

    /// Submitting user, if known
    pub submitted_by: Option<UserId>,
}

/// Validates, classifies and persists clinical submissions
pub struct IngestionGateway {
    predictions: Arc<PredictionClient>,
    store: Arc<dyn RecordStore>,
    sink: Option<Arc<MetricsSink>>,
    scheduler: Arc<RefreshScheduler>,
}

impl IngestionGateway {
    /// Create a gateway over the given collaborators
    ///
    /// `sink` is optional: when metrics logging is disabled, submissions
    /// simply skip the emission.
    pub fn new(
        predictions: Arc<PredictionClient>,
        store: Arc<dyn RecordStore>,
        sink: Option<Arc<MetricsSink>>,
        scheduler: Arc<RefreshScheduler>,
    ) -> Self {
        Self {
            predictions,
            store,
            sink,
            scheduler,
        }
    }

    /// Submit one clinical payload
    ///
    /// Sequencing is explicit: both prediction calls resolve together,
    /// persistence completes next, and only then is the refresh
    /// triggered - so the new record appears in its own refresh cycle.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ClinsightError::PredictionUnavailable`]
    /// if either inference call fails (no record is written), or a store
    /// error if persistence fails.
    pub async fn submit(&self, submission: Submission) -> Result<DiagnosticRecord> {
        let payload = submission.payload;

        let (disease, outcome) = tokio::try_join!(
            self.predictions.predict_disease(&payload),
            self.predictions.predict_outcome(&payload),
        )?;

        let record = NewDiagnosticRecord {
            patient_name: submission
                .patient_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            age: payload.age.max(0.0) as u32,
            features: payload.feature_snapshot(),
            prediction: crate::domain::Prediction { disease, outcome },
            created_by: submission.submitted_by.clone(),
        };

        let stored = self.store.add_record(record).await?;

        tracing::info!(
            record_id = %stored.id,
            primary = stored
                .prediction
                .disease
                .primary()
                .map(|c| c.disease.as_str())
                .unwrap_or("none"),
            risk = ?stored.prediction.outcome.risk,
            "Diagnostic record persisted"
        );

        self.emit_metrics(&payload, &stored);

        self.scheduler.trigger(RefreshTrigger::Submission).await;

        Ok(stored)
    }

    /// Register one patient profile (write-only)
    pub async fn register_patient(&self, patient: NewPatientProfile) -> Result<PatientProfile> {
        let stored = self.store.add_patient(patient).await?;
        tracing::info!(patient_id = %stored.id, "Patient profile created");
        Ok(stored)
    }

    /// Mirror the prediction to the metrics sink, fire-and-forget
    fn emit_metrics(&self, payload: &ClinicalPayload, record: &DiagnosticRecord) {
        let Some(sink) = self.sink.clone() else {
            return;
        };

        let payload = payload.clone();
        let user = record.created_by.clone();
        let disease_summary = json!({ "top3": record.prediction.disease.top3 });
        let outcome_summary = json!({
            "risk": record.prediction.outcome.risk,
            "probability": record.prediction.outcome.probability,
        });

        tokio::spawn(async move {
            let disease = sink
                .log_prediction(
                    sink.disease_model(),
                    &payload,
                    disease_summary,
                    user.as_ref(),
                )
                .await;
            if let Err(e) = disease {
                tracing::warn!(error = %e, "Disease metrics logging failed");
            }

            let outcome = sink
                .log_prediction(
                    sink.outcome_model(),
                    &payload,
                    outcome_summary,
                    user.as_ref(),
                )
                .await;
            if let Err(e) = outcome {
                tracing::warn!(error = %e, "Outcome metrics logging failed");
            }
        });
    }
}
