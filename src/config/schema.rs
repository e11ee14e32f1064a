//! Configuration schema types
//!
//! This module defines the configuration structure for Clinsight. The root
//! [`ClinsightConfig`] maps directly to the TOML file; every section
//! carries serde defaults and a `validate()` implementation.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Record/profile store backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// In-process store for development and tests
    Memory,
    /// Document-store REST API
    Rest,
}

/// Main Clinsight configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinsightConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Prediction service configuration
    pub prediction: PredictionConfig,

    /// Store backend (memory or rest)
    pub store_backend: StoreBackend,

    /// REST store configuration (required if store_backend = rest)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_store: Option<RestStoreConfig>,

    /// Dashboard window sizes and refresh cadence
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Conversational assistant backend
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Prediction metrics-logging sink
    #[serde(default)]
    pub metrics_log: MetricsLogConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ClinsightConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.prediction.validate()?;

        // Only the active store backend is validated; both sections may be
        // present in the TOML file
        if self.store_backend == StoreBackend::Rest {
            match self.rest_store {
                Some(ref config) => config.validate()?,
                None => {
                    return Err(
                        "rest_store configuration is required when store_backend = 'rest'"
                            .to_string(),
                    )
                }
            }
        }

        self.dashboard.validate()?;
        self.assistant.validate()?;
        self.metrics_log.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

/// Prediction service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionConfig {
    /// Base URL of the inference service
    #[serde(default = "default_prediction_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Basic auth username, if the service requires it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Basic auth password, if the service requires it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<SecretString>,

    /// Verify TLS certificates
    #[serde(default = "default_true")]
    pub tls_verify: bool,

    /// Retry policy for transient failures
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            base_url: default_prediction_url(),
            timeout_seconds: default_timeout_seconds(),
            username: None,
            password: None,
            tls_verify: true,
            retry: RetryConfig::default(),
        }
    }
}

impl PredictionConfig {
    fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("prediction.base_url cannot be empty".to_string());
        }
        if url::Url::parse(&self.base_url).is_err() {
            return Err(format!(
                "prediction.base_url is not a valid URL: {}",
                self.base_url
            ));
        }
        if self.timeout_seconds == 0 {
            return Err("prediction.timeout_seconds must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// REST document-store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestStoreConfig {
    /// Base URL of the document store
    pub base_url: String,

    /// API key sent as a bearer token, if required
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<SecretString>,

    /// Collection holding diagnostic records
    #[serde(default = "default_records_collection")]
    pub records_collection: String,

    /// Collection holding patient profiles
    #[serde(default = "default_patients_collection")]
    pub patients_collection: String,

    /// Collection holding user profiles
    #[serde(default = "default_profiles_collection")]
    pub profiles_collection: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl RestStoreConfig {
    fn validate(&self) -> Result<(), String> {
        if url::Url::parse(&self.base_url).is_err() {
            return Err(format!(
                "rest_store.base_url is not a valid URL: {}",
                self.base_url
            ));
        }
        for (name, value) in [
            ("records_collection", &self.records_collection),
            ("patients_collection", &self.patients_collection),
            ("profiles_collection", &self.profiles_collection),
        ] {
            if value.trim().is_empty() {
                return Err(format!("rest_store.{name} cannot be empty"));
            }
        }
        Ok(())
    }
}

/// Dashboard window sizes and refresh cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Window size for the dashboard feed and distribution chart
    #[serde(default = "default_feed_window")]
    pub feed_window: usize,

    /// Window size for admin analytics
    #[serde(default = "default_admin_window")]
    pub admin_window: usize,

    /// Number of labels in the top-diagnoses chart
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Periodic refresh interval in seconds while signed in
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_seconds: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            feed_window: default_feed_window(),
            admin_window: default_admin_window(),
            top_k: default_top_k(),
            refresh_interval_seconds: default_refresh_interval(),
        }
    }
}

impl DashboardConfig {
    fn validate(&self) -> Result<(), String> {
        if self.feed_window == 0 {
            return Err("dashboard.feed_window must be greater than 0".to_string());
        }
        if self.admin_window < self.feed_window {
            return Err(
                "dashboard.admin_window must be at least dashboard.feed_window".to_string(),
            );
        }
        if self.top_k == 0 {
            return Err("dashboard.top_k must be greater than 0".to_string());
        }
        if self.refresh_interval_seconds == 0 {
            return Err("dashboard.refresh_interval_seconds must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Conversational assistant backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Whether the assistant is available
    #[serde(default)]
    pub enabled: bool,

    /// Base URL of the assistant backend
    #[serde(default = "default_assistant_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_assistant_timeout")]
    pub timeout_seconds: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: default_assistant_url(),
            timeout_seconds: default_assistant_timeout(),
        }
    }
}

impl AssistantConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && url::Url::parse(&self.base_url).is_err() {
            return Err(format!(
                "assistant.base_url is not a valid URL: {}",
                self.base_url
            ));
        }
        Ok(())
    }
}

/// Prediction metrics-logging sink configuration
///
/// The sink is fire-and-forget: failures are logged and never affect a
/// submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsLogConfig {
    /// Whether metrics logging is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Endpoint the sink posts to
    #[serde(default)]
    pub endpoint: String,

    /// Model name logged for disease predictions
    #[serde(default = "default_disease_model")]
    pub disease_model: String,

    /// Model name logged for outcome predictions
    #[serde(default = "default_outcome_model")]
    pub outcome_model: String,
}

impl Default for MetricsLogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: String::new(),
            disease_model: default_disease_model(),
            outcome_model: default_outcome_model(),
        }
    }
}

impl MetricsLogConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && url::Url::parse(&self.endpoint).is_err() {
            return Err(format!(
                "metrics_log.endpoint is not a valid URL: {}",
                self.endpoint
            ));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Directory for local log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation policy: daily or hourly
    #[serde(default = "default_rotation")]
    pub local_rotation: String,

    /// Maximum log file size in megabytes
    #[serde(default = "default_max_size_mb")]
    pub local_max_size_mb: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: true,
            local_path: default_log_path(),
            local_rotation: default_rotation(),
            local_max_size_mb: default_max_size_mb(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    10_000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_prediction_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_records_collection() -> String {
    "diagnostic_records".to_string()
}

fn default_patients_collection() -> String {
    "patients".to_string()
}

fn default_profiles_collection() -> String {
    "users".to_string()
}

fn default_feed_window() -> usize {
    200
}

fn default_admin_window() -> usize {
    1000
}

fn default_top_k() -> usize {
    5
}

fn default_refresh_interval() -> u64 {
    300
}

fn default_assistant_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_assistant_timeout() -> u64 {
    60
}

fn default_disease_model() -> String {
    "disease-top3".to_string()
}

fn default_outcome_model() -> String {
    "outcome-risk".to_string()
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

fn default_max_size_mb() -> u64 {
    100
}
