//! Configuration management
//!
//! Clinsight is configured through a TOML file (default `clinsight.toml`)
//! with two layers of environment integration:
//!
//! - `${VAR}` placeholders inside the file are substituted from the
//!   environment at load time (intended for secrets kept in `.env`);
//! - `CLINSIGHT_<SECTION>_<KEY>` variables override individual values
//!   after parsing.
//!
//! # Example
//!
//! ```no_run
//! use clinsight::config::load_config;
//!
//! let config = load_config("clinsight.toml").expect("Failed to load config");
//! assert!(config.dashboard.feed_window > 0);
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, AssistantConfig, ClinsightConfig, DashboardConfig, LoggingConfig,
    MetricsLogConfig, PredictionConfig, RestStoreConfig, RetryConfig, StoreBackend,
};
pub use secret::{SecretString, SecretValue};
