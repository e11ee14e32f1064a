//! Secure credential handling using the secrecy crate
//!
//! API keys and service passwords live in memory only inside
//! `Secret<SecretValue>`: memory is zeroed on drop, Debug output is
//! redacted, and access requires an explicit `expose_secret()` call.
//!
//! # Example
//!
//! ```rust
//! use clinsight::config::{SecretString, SecretValue};
//! use secrecy::{ExposeSecret, Secret};
//!
//! let key: SecretString = Secret::new(SecretValue::from("svc-key".to_string()));
//! assert_eq!(key.expose_secret().as_ref(), "svc-key");
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Newtype wrapper for String that implements the required traits for Secret
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl From<SecretValue> for String {
    fn from(mut s: SecretValue) -> Self {
        std::mem::take(&mut s.0)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Type alias for a secret string
///
/// This wraps a `SecretValue` in a `Secret` container that:
/// - Zeros the memory when dropped
/// - Prevents accidental logging via Debug
/// - Requires explicit `expose_secret()` to access
pub type SecretString = Secret<SecretValue>;

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_secret_debug_is_redacted() {
        let secret: SecretString = Secret::new(SecretValue::from("hunter2".to_string()));
        let debug = format!("{secret:?}");
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_secret_expose() {
        let secret: SecretString = Secret::new(SecretValue::from("svc-key".to_string()));
        assert_eq!(secret.expose_secret().as_ref(), "svc-key");
        assert!(!secret.expose_secret().is_empty());
    }
}
