//! Domain error types
//!
//! This module defines the error hierarchy for Clinsight. All errors are
//! domain-specific and don't expose third-party types. Only
//! [`ClinsightError::PredictionUnavailable`] is user-visible and blocks a
//! submission; everything else degrades gracefully at the call site.

use thiserror::Error;

/// Main Clinsight error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum ClinsightError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Either inference call failed; the submission is aborted and no
    /// record is written
    #[error("Prediction service unavailable: {0}")]
    PredictionUnavailable(#[from] PredictionError),

    /// Record/profile store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Assistant backend errors
    #[error("Assistant error: {0}")]
    Assistant(String),

    /// Refresh cycle errors (logged by the scheduler, never user-visible)
    #[error("Refresh error: {0}")]
    Refresh(String),

    /// Chart rendering errors
    #[error("Render error: {0}")]
    Render(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Metrics-logging sink errors (reported only, never fatal)
    #[error("Metrics logging error: {0}")]
    MetricsLogging(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Prediction-service-specific errors
///
/// Errors that occur when calling the external inference service.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum PredictionError {
    /// Failed to connect to the prediction service
    #[error("Failed to connect to prediction service: {0}")]
    ConnectionFailed(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Invalid response from the service
    #[error("Invalid response from prediction service: {0}")]
    InvalidResponse(String),

    /// The service returned a probability or confidence that is not a
    /// finite number
    #[error("Non-finite score in prediction response: {0}")]
    NonFiniteScore(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

/// Store-specific errors
///
/// Errors that occur when interacting with the record/profile document
/// store, regardless of backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to connect to the store
    #[error("Failed to connect to store: {0}")]
    ConnectionFailed(String),

    /// Failed to write a document
    #[error("Failed to write document: {0}")]
    WriteFailed(String),

    /// Failed to query documents
    #[error("Failed to query documents: {0}")]
    QueryFailed(String),

    /// Document not found
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Failed to deserialize a stored document
    #[error("Failed to deserialize document: {0}")]
    DeserializationFailed(String),

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for ClinsightError {
    fn from(err: std::io::Error) -> Self {
        ClinsightError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ClinsightError {
    fn from(err: serde_json::Error) -> Self {
        ClinsightError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ClinsightError {
    fn from(err: toml::de::Error) -> Self {
        ClinsightError::Configuration(format!("TOML parse error: {err}"))
    }
}
