//! Validate config command implementation

use crate::config::{load_config, StoreBackend};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // load_config already validated; re-run to print a summary either way
        match config.validate() {
            Ok(_) => {
                println!("✅ Configuration is valid");
                println!();
                println!("Configuration Summary:");
                println!("  Log Level: {}", config.application.log_level);
                println!("  Prediction Service: {}", config.prediction.base_url);

                match config.store_backend {
                    StoreBackend::Memory => println!("  Store Backend: memory"),
                    StoreBackend::Rest => {
                        println!("  Store Backend: rest");
                        if let Some(ref rest) = config.rest_store {
                            println!("  Store Endpoint: {}", rest.base_url);
                            println!("  Records Collection: {}", rest.records_collection);
                        }
                    }
                }

                println!("  Feed Window: {}", config.dashboard.feed_window);
                println!("  Admin Window: {}", config.dashboard.admin_window);
                println!("  Top K: {}", config.dashboard.top_k);
                println!(
                    "  Refresh Interval: {}s",
                    config.dashboard.refresh_interval_seconds
                );
                println!("  Assistant Enabled: {}", config.assistant.enabled);
                println!("  Metrics Logging: {}", config.metrics_log.enabled);
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(2) // Configuration error exit code
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_args_creation() {
        let args = ValidateArgs {};
        let _ = format!("{args:?}");
    }
}
