//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ClinsightConfig;
use crate::domain::errors::ClinsightError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ClinsightConfig
/// 4. Applies environment variable overrides (CLINSIGHT_* prefix)
/// 5. Validates the configuration
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use clinsight::config::load_config;
///
/// let config = load_config("clinsight.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ClinsightConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ClinsightError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ClinsightError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    // Perform environment variable substitution
    let contents = substitute_env_vars(&contents)?;

    let mut config: ClinsightConfig = toml::from_str(&contents)
        .map_err(|e| ClinsightError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        ClinsightError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Arguments
///
/// * `input` - String containing ${VAR} placeholders
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ClinsightError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the CLINSIGHT_* prefix
///
/// Environment variables follow the pattern: CLINSIGHT_<SECTION>_<KEY>
/// For example: CLINSIGHT_PREDICTION_BASE_URL, CLINSIGHT_DASHBOARD_TOP_K
fn apply_env_overrides(config: &mut ClinsightConfig) {
    use secrecy::Secret;

    if let Ok(val) = std::env::var("CLINSIGHT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Prediction service overrides
    if let Ok(val) = std::env::var("CLINSIGHT_PREDICTION_BASE_URL") {
        config.prediction.base_url = val;
    }
    if let Ok(val) = std::env::var("CLINSIGHT_PREDICTION_USERNAME") {
        config.prediction.username = Some(val);
    }
    if let Ok(val) = std::env::var("CLINSIGHT_PREDICTION_PASSWORD") {
        config.prediction.password = Some(Secret::new(val.into()));
    }
    if let Ok(val) = std::env::var("CLINSIGHT_PREDICTION_TLS_VERIFY") {
        config.prediction.tls_verify = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("CLINSIGHT_PREDICTION_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.prediction.timeout_seconds = timeout;
        }
    }

    // REST store overrides (only if the section is configured)
    if let Some(ref mut rest) = config.rest_store {
        if let Ok(val) = std::env::var("CLINSIGHT_REST_STORE_BASE_URL") {
            rest.base_url = val;
        }
        if let Ok(val) = std::env::var("CLINSIGHT_REST_STORE_API_KEY") {
            rest.api_key = Some(Secret::new(val.into()));
        }
    }

    // Dashboard overrides
    if let Ok(val) = std::env::var("CLINSIGHT_DASHBOARD_FEED_WINDOW") {
        if let Ok(window) = val.parse() {
            config.dashboard.feed_window = window;
        }
    }
    if let Ok(val) = std::env::var("CLINSIGHT_DASHBOARD_ADMIN_WINDOW") {
        if let Ok(window) = val.parse() {
            config.dashboard.admin_window = window;
        }
    }
    if let Ok(val) = std::env::var("CLINSIGHT_DASHBOARD_TOP_K") {
        if let Ok(k) = val.parse() {
            config.dashboard.top_k = k;
        }
    }
    if let Ok(val) = std::env::var("CLINSIGHT_DASHBOARD_REFRESH_INTERVAL_SECONDS") {
        if let Ok(interval) = val.parse() {
            config.dashboard.refresh_interval_seconds = interval;
        }
    }

    // Assistant overrides
    if let Ok(val) = std::env::var("CLINSIGHT_ASSISTANT_ENABLED") {
        config.assistant.enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CLINSIGHT_ASSISTANT_BASE_URL") {
        config.assistant.base_url = val;
    }

    // Metrics sink overrides
    if let Ok(val) = std::env::var("CLINSIGHT_METRICS_LOG_ENABLED") {
        config.metrics_log.enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CLINSIGHT_METRICS_LOG_ENDPOINT") {
        config.metrics_log.endpoint = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("CLINSIGHT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("CLINSIGHT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
