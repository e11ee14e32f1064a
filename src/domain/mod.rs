//! Domain models and types for Clinsight.
//!
//! This module contains the core domain models, types, and business rules
//! for the console: the append-only diagnostic record log, the normalized
//! clinical payload schema, user/patient profiles, and the error taxonomy.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`RecordId`], [`UserId`], [`PatientId`])
//! - **Domain models** ([`DiagnosticRecord`], [`ClinicalPayload`],
//!   [`UserProfile`], [`PatientProfile`], [`ChatMessage`])
//! - **Error types** ([`ClinsightError`], [`PredictionError`], [`StoreError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Clinsight uses the newtype pattern for identifiers to prevent mixing
//! different ID types:
//!
//! ```rust
//! use clinsight::domain::{RecordId, UserId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let record_id = RecordId::new("rec-123")?;
//! let user_id = UserId::new("uid-456")?;
//!
//! // This won't compile - type safety prevents mixing IDs
//! // let wrong: RecordId = user_id;  // Compile error!
//! # Ok(())
//! # }
//! ```
//!
//! # Immutability
//!
//! [`DiagnosticRecord`] values are immutable once created: the store
//! assigns `id` and `created_at`, the prediction results are set exactly
//! once, and analytics code only ever borrows records.

pub mod errors;
pub mod ids;
pub mod payload;
pub mod profile;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{ClinsightError, PredictionError, StoreError};
pub use ids::{PatientId, RecordId, UserId};
pub use payload::{ClinicalPayload, Gender, Level};
pub use profile::{ChatMessage, NewPatientProfile, PatientProfile, Role, Sender, UserProfile};
pub use record::{
    DiagnosticRecord, DiseaseCandidate, DiseaseResult, FeatureValue, NewDiagnosticRecord,
    OutcomeResult, Prediction, RiskLevel,
};
pub use result::Result;
