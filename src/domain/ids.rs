//! Domain identifier types with validation
//!
//! This module provides newtype wrappers for the identifiers used by the
//! console. Each type ensures type safety and rejects empty values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Diagnostic record identifier newtype wrapper
///
/// Represents the opaque identifier the record store assigns to a
/// diagnostic record. The console never generates these itself.
///
/// # Examples
///
/// ```
/// use clinsight::domain::ids::RecordId;
/// use std::str::FromStr;
///
/// let id = RecordId::from_str("0b2c8a54-7d13-4b2f-b2d4-9f3b1d9c1a77").unwrap();
/// assert_eq!(id.as_str(), "0b2c8a54-7d13-4b2f-b2d4-9f3b1d9c1a77");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    /// Creates a new RecordId from a string
    ///
    /// # Arguments
    ///
    /// * `id` - The record identifier string
    ///
    /// # Returns
    ///
    /// Returns `Ok(RecordId)` if the ID is valid, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Record ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the record ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// User identifier newtype wrapper
///
/// Identifies the authenticated user who submitted a record or whose role
/// is being resolved. Assigned by the external identity provider.
///
/// # Examples
///
/// ```
/// use clinsight::domain::ids::UserId;
/// use std::str::FromStr;
///
/// let user = UserId::from_str("uid-4821").unwrap();
/// assert_eq!(user.as_str(), "uid-4821");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId from a string
    ///
    /// # Arguments
    ///
    /// * `id` - The user identifier string
    ///
    /// # Returns
    ///
    /// Returns `Ok(UserId)` if the ID is valid, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("User ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the user ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Patient identifier newtype wrapper
///
/// Identifies a registered patient profile. Assigned by the store on
/// creation, like [`RecordId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatientId(String);

impl PatientId {
    /// Creates a new PatientId from a string
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Patient ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the patient ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PatientId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for PatientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_creation() {
        let id = RecordId::new("0b2c8a54-7d13-4b2f-b2d4-9f3b1d9c1a77").unwrap();
        assert_eq!(id.as_str(), "0b2c8a54-7d13-4b2f-b2d4-9f3b1d9c1a77");
    }

    #[test]
    fn test_record_id_empty_fails() {
        assert!(RecordId::new("").is_err());
        assert!(RecordId::new("   ").is_err());
    }

    #[test]
    fn test_record_id_display() {
        let id = RecordId::new("rec-1").unwrap();
        assert_eq!(format!("{}", id), "rec-1");
    }

    #[test]
    fn test_user_id_from_str() {
        let user: UserId = "uid-4821".parse().unwrap();
        assert_eq!(user.as_str(), "uid-4821");
    }

    #[test]
    fn test_user_id_empty_fails() {
        assert!(UserId::new("").is_err());
    }

    #[test]
    fn test_patient_id_roundtrip() {
        let id = PatientId::new("pat-77").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        let back: PatientId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
