//! User, patient and chat message domain models
//!
//! User profiles are created once at registration and their role is
//! mutated only by an out-of-band role-management process; the console
//! never writes role. Patient profiles are write-only from this core's
//! perspective.

use super::ids::{PatientId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Dashboard role resolved from the user profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Standard clinician role
    #[default]
    Doctor,
    /// Administrator with access to aggregate analytics
    Admin,
}

/// A registered console user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Identity-provider-assigned identifier
    pub id: UserId,

    /// Account email
    pub email: String,

    /// Display name shown in the console
    pub display_name: String,

    /// Role assigned out-of-band; read-only here
    pub role: Role,
}

/// A registered patient
///
/// Independent of [`super::record::DiagnosticRecord`] except by a shared
/// `created_by`; the console only ever creates these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    /// Store-assigned identifier
    pub id: PatientId,

    /// Patient name
    pub name: String,

    /// Patient age in years
    pub age: u32,

    /// Patient gender as entered
    pub gender: String,

    /// Contact phone number
    pub phone: String,

    /// Blood pressure category as entered
    pub blood_pressure: String,

    /// Registering user, if known
    pub created_by: Option<UserId>,

    /// Store-assigned creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A patient profile as handed to the store for creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPatientProfile {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub phone: String,
    pub blood_pressure: String,
    pub created_by: Option<UserId>,
}

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// One message in an assistant conversation
///
/// Append-only, ordered by timestamp, owned by the session that created
/// it; never persisted by this core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message author
    pub sender: Sender,

    /// Message text
    pub text: String,

    /// Client-side creation time
    pub timestamp: DateTime<Utc>,

    /// Session user the message belongs to
    pub uid: Option<UserId>,
}

impl ChatMessage {
    /// Creates a message stamped with the current time
    pub fn now(sender: Sender, text: impl Into<String>, uid: Option<UserId>) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: Utc::now(),
            uid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"doctor\"").unwrap();
        assert_eq!(role, Role::Doctor);
    }

    #[test]
    fn test_role_default_is_doctor() {
        assert_eq!(Role::default(), Role::Doctor);
    }

    #[test]
    fn test_chat_message_ordering_key() {
        let a = ChatMessage::now(Sender::User, "first", None);
        let b = ChatMessage::now(Sender::Assistant, "second", None);
        assert!(a.timestamp <= b.timestamp);
    }
}
