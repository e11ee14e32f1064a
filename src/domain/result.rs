//! Result type alias for Clinsight operations

use super::errors::ClinsightError;

/// Result type alias using [`ClinsightError`]
///
/// This is the standard Result type used throughout Clinsight.
pub type Result<T> = std::result::Result<T, ClinsightError>;
