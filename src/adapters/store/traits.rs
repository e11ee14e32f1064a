//! Store abstraction traits
//!
//! This module defines the interfaces the console consumes from the
//! document store. The store is an external collaborator: it assigns
//! record ids and creation timestamps, keeps `created_at` monotonic, and
//! is assumed read-after-write consistent within a session.

use crate::domain::{
    DiagnosticRecord, NewDiagnosticRecord, NewPatientProfile, PatientProfile, Result, UserId,
    UserProfile,
};
use async_trait::async_trait;

/// Append/query contract over the diagnostic event log
///
/// Records are append-only: there is no update or delete. `recent_records`
/// is the windowed query backing every aggregation and metrics
/// computation.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Append one diagnostic record
    ///
    /// The store assigns `id` and `created_at` and returns the complete
    /// record.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; nothing is partially written.
    async fn add_record(&self, record: NewDiagnosticRecord) -> Result<DiagnosticRecord>;

    /// Fetch the most recent records, ordered by `created_at` descending
    ///
    /// # Arguments
    ///
    /// * `limit` - Maximum number of records to return
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn recent_records(&self, limit: usize) -> Result<Vec<DiagnosticRecord>>;

    /// Create one patient profile
    ///
    /// Patients are write-only from the console's perspective: create,
    /// no update or delete.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    async fn add_patient(&self, patient: NewPatientProfile) -> Result<PatientProfile>;
}

/// Point-lookup contract over user profiles
///
/// The console only ever reads profiles; roles are assigned by an
/// out-of-band process.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Look up a user profile by id
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(UserProfile))` if found, `Ok(None)` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails for reasons other than
    /// "not found".
    async fn find_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>>;
}
