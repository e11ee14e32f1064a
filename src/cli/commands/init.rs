//! Init command implementation
//!
//! Generates a sample configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "clinsight.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Clinsight configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Point [prediction].base_url at your inference service");
                println!("  3. Set store_backend to 'memory' or 'rest'");
                println!("  4. Validate configuration: clinsight validate-config");
                println!("  5. Start the dashboard: clinsight watch --user <uid>");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Sample configuration content
    fn sample_config() -> &'static str {
        r#"# Clinsight Configuration File
# Clinical Decision-Support Console

# Store backend: "memory" (development) or "rest"
store_backend = "memory"

[application]
# Log level: trace, debug, info, warn, error
log_level = "info"

[prediction]
# Base URL of the inference service
base_url = "http://localhost:5000"
timeout_seconds = 30
tls_verify = true
# Basic auth, if the service requires it:
# username = "svc"
# password = "${CLINSIGHT_PREDICTION_PASSWORD}"

[prediction.retry]
max_retries = 3
initial_delay_ms = 500
max_delay_ms = 10000
backoff_multiplier = 2.0

# Required when store_backend = "rest":
# [rest_store]
# base_url = "https://store.example.com"
# api_key = "${CLINSIGHT_REST_STORE_API_KEY}"
# records_collection = "diagnostic_records"
# patients_collection = "patients"
# profiles_collection = "users"

[dashboard]
# Window for the record feed and distribution chart
feed_window = 200
# Window for admin analytics
admin_window = 1000
# Labels in the top-diagnoses chart
top_k = 5
# Periodic refresh cadence while signed in
refresh_interval_seconds = 300

[assistant]
enabled = false
base_url = "http://localhost:5000"
timeout_seconds = 60

[metrics_log]
enabled = false
# endpoint = "http://localhost:5000/log-metrics"

[logging]
local_enabled = true
local_path = "logs"
local_rotation = "daily"
local_max_size_mb = 100
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_config_parses_and_validates() {
        let config: crate::config::ClinsightConfig =
            toml::from_str(InitArgs::sample_config()).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.dashboard.feed_window, 200);
        assert_eq!(config.dashboard.admin_window, 1000);
    }
}
