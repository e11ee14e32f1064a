//! REST document-store backend
//!
//! Talks to the persistent document store over its REST API: ordered
//! range queries (`orderBy=createdAt&direction=desc&limit=N`) and
//! document adds. Documents travel in camelCase wire form; the store
//! assigns ids and creation timestamps.

use crate::adapters::store::traits::{ProfileStore, RecordStore};
use crate::config::RestStoreConfig;
use crate::domain::errors::StoreError;
use crate::domain::{
    ClinsightError, DiagnosticRecord, DiseaseResult, FeatureValue, NewDiagnosticRecord,
    NewPatientProfile, OutcomeResult, PatientId, PatientProfile, RecordId, Result, Role, UserId,
    UserProfile,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// REST client for the document store
pub struct RestStore {
    base_url: String,
    client: Client,
    config: RestStoreConfig,
}

impl RestStore {
    /// Create a new REST store client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: RestStoreConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                ClinsightError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url,
            client,
            config,
        })
    }

    fn documents_url(&self, collection: &str) -> String {
        format!("{}/collections/{collection}/documents", self.base_url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.config.api_key {
            Some(ref key) => request.bearer_auth(key.expose_secret().as_ref()),
            None => request,
        }
    }

    async fn add_document<B: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        collection: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.authorize(self.client.post(self.documents_url(collection)).json(body));

        let response = request
            .send()
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::WriteFailed(format!(
                "{collection} add failed with status {status}: {body}"
            ))
            .into());
        }

        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::DeserializationFailed(e.to_string()).into())
    }
}

#[async_trait]
impl RecordStore for RestStore {
    async fn add_record(&self, record: NewDiagnosticRecord) -> Result<DiagnosticRecord> {
        let document: RecordDocument = self
            .add_document(
                &self.config.records_collection,
                &NewRecordDocument::from(record),
            )
            .await?;
        document.try_into()
    }

    async fn recent_records(&self, limit: usize) -> Result<Vec<DiagnosticRecord>> {
        let request = self.authorize(
            self.client
                .get(self.documents_url(&self.config.records_collection))
                .query(&[
                    ("orderBy", "createdAt"),
                    ("direction", "desc"),
                    ("limit", &limit.to_string()),
                ]),
        );

        let response = request
            .send()
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::QueryFailed(format!(
                "Record query failed with status {status}: {body}"
            ))
            .into());
        }

        let page = response
            .json::<QueryResponse<RecordDocument>>()
            .await
            .map_err(|e| StoreError::DeserializationFailed(e.to_string()))?;

        page.documents
            .into_iter()
            .map(RecordDocument::try_into)
            .collect()
    }

    async fn add_patient(&self, patient: NewPatientProfile) -> Result<PatientProfile> {
        let document: PatientDocument = self
            .add_document(
                &self.config.patients_collection,
                &NewPatientDocument::from(patient),
            )
            .await?;
        document.try_into()
    }
}

#[async_trait]
impl ProfileStore for RestStore {
    async fn find_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>> {
        let url = format!(
            "{}/{}",
            self.documents_url(&self.config.profiles_collection),
            user_id.as_str()
        );

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::QueryFailed(format!(
                "Profile lookup failed with status {status}: {body}"
            ))
            .into());
        }

        let document = response
            .json::<ProfileDocument>()
            .await
            .map_err(|e| StoreError::DeserializationFailed(e.to_string()))?;

        Ok(Some(document.try_into()?))
    }
}

/// Paged query response
#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    #[serde(default = "Vec::new")]
    documents: Vec<T>,
}

/// Diagnostic record in wire form
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordDocument {
    id: String,
    patient_name: String,
    age: u32,
    #[serde(default)]
    features: BTreeMap<String, FeatureValue>,
    prediction: PredictionDocument,
    created_at: DateTime<Utc>,
    #[serde(default)]
    created_by: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PredictionDocument {
    disease_result: DiseaseResult,
    outcome_result: OutcomeResult,
}

/// Record as submitted for creation (id and createdAt store-assigned)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewRecordDocument {
    patient_name: String,
    age: u32,
    features: BTreeMap<String, FeatureValue>,
    prediction: PredictionDocument,
    created_by: Option<String>,
}

impl From<NewDiagnosticRecord> for NewRecordDocument {
    fn from(record: NewDiagnosticRecord) -> Self {
        Self {
            patient_name: record.patient_name,
            age: record.age,
            features: record.features,
            prediction: PredictionDocument {
                disease_result: record.prediction.disease,
                outcome_result: record.prediction.outcome,
            },
            created_by: record.created_by.map(UserId::into_inner),
        }
    }
}

impl TryFrom<RecordDocument> for DiagnosticRecord {
    type Error = ClinsightError;

    fn try_from(document: RecordDocument) -> Result<DiagnosticRecord> {
        let created_by = match document.created_by {
            Some(uid) => Some(
                UserId::new(uid).map_err(StoreError::DeserializationFailed)?,
            ),
            None => None,
        };

        Ok(DiagnosticRecord {
            id: RecordId::new(document.id).map_err(StoreError::DeserializationFailed)?,
            patient_name: document.patient_name,
            age: document.age,
            features: document.features,
            prediction: crate::domain::Prediction {
                disease: document.prediction.disease_result,
                outcome: document.prediction.outcome_result,
            },
            created_at: document.created_at,
            created_by,
        })
    }
}

/// Patient profile in wire form
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PatientDocument {
    id: String,
    name: String,
    age: u32,
    gender: String,
    phone: String,
    blood_pressure: String,
    #[serde(default)]
    created_by: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewPatientDocument {
    name: String,
    age: u32,
    gender: String,
    phone: String,
    blood_pressure: String,
    created_by: Option<String>,
}

impl From<NewPatientProfile> for NewPatientDocument {
    fn from(patient: NewPatientProfile) -> Self {
        Self {
            name: patient.name,
            age: patient.age,
            gender: patient.gender,
            phone: patient.phone,
            blood_pressure: patient.blood_pressure,
            created_by: patient.created_by.map(UserId::into_inner),
        }
    }
}

impl TryFrom<PatientDocument> for PatientProfile {
    type Error = ClinsightError;

    fn try_from(document: PatientDocument) -> Result<PatientProfile> {
        let created_by = match document.created_by {
            Some(uid) => Some(
                UserId::new(uid).map_err(StoreError::DeserializationFailed)?,
            ),
            None => None,
        };

        Ok(PatientProfile {
            id: PatientId::new(document.id).map_err(StoreError::DeserializationFailed)?,
            name: document.name,
            age: document.age,
            gender: document.gender,
            phone: document.phone,
            blood_pressure: document.blood_pressure,
            created_by,
            created_at: document.created_at,
        })
    }
}

/// User profile in wire form
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileDocument {
    id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    display_name: String,
    role: Role,
}

impl TryFrom<ProfileDocument> for UserProfile {
    type Error = ClinsightError;

    fn try_from(document: ProfileDocument) -> Result<UserProfile> {
        Ok(UserProfile {
            id: UserId::new(document.id).map_err(StoreError::DeserializationFailed)?,
            email: document.email,
            display_name: document.display_name,
            role: document.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DiseaseCandidate, Prediction, RiskLevel};

    #[test]
    fn test_record_document_round_trip() {
        let record = NewDiagnosticRecord {
            patient_name: "A. Patient".to_string(),
            age: 45,
            features: Default::default(),
            prediction: Prediction {
                disease: DiseaseResult {
                    top3: vec![DiseaseCandidate {
                        disease: "Flu".to_string(),
                        confidence: 0.8,
                    }],
                },
                outcome: OutcomeResult {
                    risk: RiskLevel::HighRisk,
                    probability: 0.7,
                },
            },
            created_by: Some(UserId::new("uid-1").unwrap()),
        };

        let wire = serde_json::to_value(NewRecordDocument::from(record)).unwrap();
        assert_eq!(wire["patientName"], "A. Patient");
        assert_eq!(wire["prediction"]["outcomeResult"]["risk"], "High Risk");
        assert_eq!(wire["prediction"]["diseaseResult"]["top3"][0]["disease"], "Flu");
        assert_eq!(wire["createdBy"], "uid-1");
    }

    #[test]
    fn test_record_document_parses_stored_form() {
        let document: RecordDocument = serde_json::from_value(serde_json::json!({
            "id": "rec-1",
            "patientName": "Unknown",
            "age": 0,
            "prediction": {
                "diseaseResult": {"top3": []},
                "outcomeResult": {"risk": "Low Risk", "probability": 0.1}
            },
            "createdAt": "2026-01-10T09:30:00Z"
        }))
        .unwrap();

        let record = DiagnosticRecord::try_from(document).unwrap();
        assert_eq!(record.id.as_str(), "rec-1");
        assert!(record.prediction.disease.primary().is_none());
        assert!(record.created_by.is_none());
    }

    #[test]
    fn test_profile_document_role_parsing() {
        let document: ProfileDocument = serde_json::from_value(serde_json::json!({
            "id": "uid-9",
            "email": "admin@clinic.example",
            "displayName": "Admin",
            "role": "admin"
        }))
        .unwrap();

        let profile = UserProfile::try_from(document).unwrap();
        assert_eq!(profile.role, Role::Admin);
    }
}
