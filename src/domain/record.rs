//! Diagnostic record domain model
//!
//! This module defines the core DiagnosticRecord type: one immutable entry
//! in the append-only prediction event log. Records are created exactly
//! once by the ingestion gateway and never updated; the analytics layer
//! only ever reads them.

use super::ids::{RecordId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Risk category returned by the outcome classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Low predicted risk
    #[serde(rename = "Low Risk", alias = "LowRisk")]
    LowRisk,
    /// High predicted risk
    #[serde(rename = "High Risk", alias = "HighRisk")]
    HighRisk,
}

impl RiskLevel {
    /// Parse a risk label as emitted by the inference service
    ///
    /// Accepts both the spaced form ("High Risk") and the compact form
    /// ("HighRisk"), case-insensitively.
    pub fn parse(label: &str) -> Result<Self, String> {
        match label.trim().to_lowercase().replace(' ', "").as_str() {
            "lowrisk" => Ok(RiskLevel::LowRisk),
            "highrisk" => Ok(RiskLevel::HighRisk),
            other => Err(format!("Unknown risk label: {other}")),
        }
    }
}

/// A single value in the normalized feature snapshot of a record
///
/// Features are the clinician-submitted inputs as they were sent to the
/// inference service: free text, numbers, or Yes/No flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    /// Yes/No symptom flag
    Flag(bool),
    /// Numeric measurement
    Number(f64),
    /// Categorical or free-text value
    Text(String),
}

/// One ranked disease candidate from the classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseCandidate {
    /// Disease label
    pub disease: String,

    /// Classifier confidence, always within [0, 1]
    pub confidence: f64,
}

/// Disease classification result: up to three candidates ordered by
/// descending confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DiseaseResult {
    /// Ranked candidates, at most three
    pub top3: Vec<DiseaseCandidate>,
}

impl DiseaseResult {
    /// The highest-confidence candidate, if any
    pub fn primary(&self) -> Option<&DiseaseCandidate> {
        self.top3.first()
    }
}

/// Outcome classification result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeResult {
    /// Predicted risk category
    pub risk: RiskLevel,

    /// Predicted probability of the high-risk outcome, always within [0, 1]
    pub probability: f64,
}

/// Both classifier results attached to a record
///
/// Set exactly once at record creation, never updated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Disease classification result
    pub disease: DiseaseResult,

    /// Outcome/risk classification result
    pub outcome: OutcomeResult,
}

/// An immutable diagnostic event record
///
/// One entry in the append-only log the analytics pipeline consumes.
/// `id` and `created_at` are assigned by the store; `created_at` is the
/// sole ordering key for windowed queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    /// Opaque store-assigned identifier
    pub id: RecordId,

    /// Patient display name; may be empty or "Unknown"
    pub patient_name: String,

    /// Patient age in years
    pub age: u32,

    /// Normalized feature snapshot submitted to the classifiers
    pub features: BTreeMap<String, FeatureValue>,

    /// Classifier results, set once at creation
    pub prediction: Prediction,

    /// Store-assigned creation timestamp (monotonic per store)
    pub created_at: DateTime<Utc>,

    /// Submitting user, if known; weak reference without ownership
    pub created_by: Option<UserId>,
}

/// A diagnostic record as handed to the store for persistence
///
/// The store assigns `id` and `created_at` and returns the full
/// [`DiagnosticRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDiagnosticRecord {
    /// Patient display name; may be empty or "Unknown"
    pub patient_name: String,

    /// Patient age in years
    pub age: u32,

    /// Normalized feature snapshot submitted to the classifiers
    pub features: BTreeMap<String, FeatureValue>,

    /// Classifier results
    pub prediction: Prediction,

    /// Submitting user, if known
    pub created_by: Option<UserId>,
}

impl NewDiagnosticRecord {
    /// Creates a new builder for constructing a NewDiagnosticRecord
    pub fn builder() -> NewDiagnosticRecordBuilder {
        NewDiagnosticRecordBuilder::default()
    }
}

/// Builder for constructing [`NewDiagnosticRecord`] instances
#[derive(Debug, Default)]
pub struct NewDiagnosticRecordBuilder {
    patient_name: Option<String>,
    age: Option<u32>,
    features: BTreeMap<String, FeatureValue>,
    prediction: Option<Prediction>,
    created_by: Option<UserId>,
}

impl NewDiagnosticRecordBuilder {
    /// Creates a new NewDiagnosticRecordBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the patient display name
    pub fn patient_name(mut self, name: impl Into<String>) -> Self {
        self.patient_name = Some(name.into());
        self
    }

    /// Sets the patient age
    pub fn age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    /// Sets the normalized feature snapshot
    pub fn features(mut self, features: BTreeMap<String, FeatureValue>) -> Self {
        self.features = features;
        self
    }

    /// Sets the classifier results
    pub fn prediction(mut self, prediction: Prediction) -> Self {
        self.prediction = Some(prediction);
        self
    }

    /// Sets the submitting user
    pub fn created_by(mut self, user: Option<UserId>) -> Self {
        self.created_by = user;
        self
    }

    /// Builds the NewDiagnosticRecord
    ///
    /// # Errors
    ///
    /// Returns an error if the prediction is missing. A missing patient
    /// name defaults to "Unknown".
    pub fn build(self) -> Result<NewDiagnosticRecord, String> {
        Ok(NewDiagnosticRecord {
            patient_name: self
                .patient_name
                .unwrap_or_else(|| "Unknown".to_string()),
            age: self.age.unwrap_or(0),
            features: self.features,
            prediction: self.prediction.ok_or("prediction is required")?,
            created_by: self.created_by,
        })
    }
}
