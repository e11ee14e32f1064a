//! In-memory store backend
//!
//! Backs development runs and tests. Semantics match the REST backend:
//! store-assigned ids, strictly monotonic `created_at`, descending
//! windowed queries.

use crate::adapters::store::traits::{ProfileStore, RecordStore};
use crate::domain::errors::StoreError;
use crate::domain::{
    DiagnosticRecord, NewDiagnosticRecord, NewPatientProfile, PatientId, PatientProfile, RecordId,
    Result, UserId, UserProfile,
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// In-process record and profile store
///
/// # Example
///
/// ```
/// use clinsight::adapters::store::MemoryStore;
/// use clinsight::domain::{Role, UserId, UserProfile};
///
/// let store = MemoryStore::new();
/// store.insert_profile(UserProfile {
///     id: UserId::new("uid-1").unwrap(),
///     email: "admin@clinic.example".to_string(),
///     display_name: "Admin".to_string(),
///     role: Role::Admin,
/// });
/// ```
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    // Ascending by created_at; appends keep the order because timestamps
    // are assigned monotonically
    records: Vec<DiagnosticRecord>,
    patients: Vec<PatientProfile>,
    profiles: HashMap<UserId, UserProfile>,
    last_assigned: Option<DateTime<Utc>>,
}

impl Inner {
    /// Next creation timestamp: monotonic even when the wall clock stalls
    /// within a microsecond
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let next = match self.last_assigned {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_assigned = Some(next);
        next
    }
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user profile (registration is external to the console)
    pub fn insert_profile(&self, profile: UserProfile) {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        inner.profiles.insert(profile.id.clone(), profile);
    }

    /// Number of records currently stored
    pub fn record_count(&self) -> usize {
        self.inner.lock().expect("store mutex poisoned").records.len()
    }

    /// Number of patient profiles currently stored
    pub fn patient_count(&self) -> usize {
        self.inner.lock().expect("store mutex poisoned").patients.len()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn add_record(&self, record: NewDiagnosticRecord) -> Result<DiagnosticRecord> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        let created_at = inner.next_timestamp();

        let stored = DiagnosticRecord {
            id: RecordId::new(Uuid::new_v4().to_string())
                .map_err(|e| StoreError::WriteFailed(e))?,
            patient_name: record.patient_name,
            age: record.age,
            features: record.features,
            prediction: record.prediction,
            created_at,
            created_by: record.created_by,
        };

        inner.records.push(stored.clone());
        Ok(stored)
    }

    async fn recent_records(&self, limit: usize) -> Result<Vec<DiagnosticRecord>> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner.records.iter().rev().take(limit).cloned().collect())
    }

    async fn add_patient(&self, patient: NewPatientProfile) -> Result<PatientProfile> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        let created_at = inner.next_timestamp();

        let stored = PatientProfile {
            id: PatientId::new(Uuid::new_v4().to_string())
                .map_err(|e| StoreError::WriteFailed(e))?,
            name: patient.name,
            age: patient.age,
            gender: patient.gender,
            phone: patient.phone,
            blood_pressure: patient.blood_pressure,
            created_by: patient.created_by,
            created_at,
        };

        inner.patients.push(stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn find_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner.profiles.get(user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        DiseaseCandidate, DiseaseResult, OutcomeResult, Prediction, RiskLevel, Role,
    };

    fn sample_record(name: &str) -> NewDiagnosticRecord {
        NewDiagnosticRecord {
            patient_name: name.to_string(),
            age: 40,
            features: Default::default(),
            prediction: Prediction {
                disease: DiseaseResult {
                    top3: vec![DiseaseCandidate {
                        disease: "Flu".to_string(),
                        confidence: 0.8,
                    }],
                },
                outcome: OutcomeResult {
                    risk: RiskLevel::LowRisk,
                    probability: 0.2,
                },
            },
            created_by: None,
        }
    }

    #[tokio::test]
    async fn test_add_record_assigns_id_and_timestamp() {
        let store = MemoryStore::new();
        let stored = store.add_record(sample_record("A")).await.unwrap();
        assert!(!stored.id.as_str().is_empty());
        assert_eq!(stored.patient_name, "A");
    }

    #[tokio::test]
    async fn test_timestamps_strictly_monotonic() {
        let store = MemoryStore::new();
        let a = store.add_record(sample_record("A")).await.unwrap();
        let b = store.add_record(sample_record("B")).await.unwrap();
        let c = store.add_record(sample_record("C")).await.unwrap();
        assert!(a.created_at < b.created_at);
        assert!(b.created_at < c.created_at);
    }

    #[tokio::test]
    async fn test_recent_records_descending_with_limit() {
        let store = MemoryStore::new();
        for name in ["A", "B", "C"] {
            store.add_record(sample_record(name)).await.unwrap();
        }

        let window = store.recent_records(2).await.unwrap();
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].patient_name, "C");
        assert_eq!(window[1].patient_name, "B");
    }

    #[tokio::test]
    async fn test_profile_lookup() {
        let store = MemoryStore::new();
        let id = UserId::new("uid-1").unwrap();
        store.insert_profile(UserProfile {
            id: id.clone(),
            email: "doc@clinic.example".to_string(),
            display_name: "Doc".to_string(),
            role: Role::Doctor,
        });

        let found = store.find_profile(&id).await.unwrap();
        assert_eq!(found.unwrap().role, Role::Doctor);

        let missing = store
            .find_profile(&UserId::new("uid-2").unwrap())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_add_patient_write_only() {
        let store = MemoryStore::new();
        let stored = store
            .add_patient(NewPatientProfile {
                name: "P. Patient".to_string(),
                age: 61,
                gender: "Female".to_string(),
                phone: "555-0100".to_string(),
                blood_pressure: "Normal".to_string(),
                created_by: None,
            })
            .await
            .unwrap();
        assert!(!stored.id.as_str().is_empty());
        assert_eq!(stored.name, "P. Patient");
        assert_eq!(store.patient_count(), 1);
    }
}
