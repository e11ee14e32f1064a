//! Store backend factory
//!
//! Creates the record and profile store pair for the configured backend.

use crate::adapters::store::memory::MemoryStore;
use crate::adapters::store::rest::RestStore;
use crate::adapters::store::traits::{ProfileStore, RecordStore};
use crate::config::{ClinsightConfig, StoreBackend};
use crate::domain::{ClinsightError, Result};
use std::sync::Arc;

/// Create the record and profile stores for the configured backend
///
/// Both handles may point at the same underlying client; they are split
/// so consumers only see the contract they need.
///
/// # Errors
///
/// Returns an error if the REST backend is selected without a
/// `rest_store` section or the client cannot be built.
pub fn create_stores(
    config: &ClinsightConfig,
) -> Result<(Arc<dyn RecordStore>, Arc<dyn ProfileStore>)> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory store backend");
            let store = Arc::new(MemoryStore::new());
            Ok((store.clone(), store))
        }
        StoreBackend::Rest => {
            let rest_config = config.rest_store.clone().ok_or_else(|| {
                ClinsightError::Configuration(
                    "rest_store configuration is required when store_backend = 'rest'".to_string(),
                )
            })?;

            tracing::info!(base_url = %rest_config.base_url, "Using REST store backend");
            let store = Arc::new(RestStore::new(rest_config)?);
            Ok((store.clone(), store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        ApplicationConfig, AssistantConfig, DashboardConfig, LoggingConfig, MetricsLogConfig,
        PredictionConfig,
    };

    fn memory_config() -> ClinsightConfig {
        ClinsightConfig {
            application: ApplicationConfig::default(),
            prediction: PredictionConfig::default(),
            store_backend: StoreBackend::Memory,
            rest_store: None,
            dashboard: DashboardConfig::default(),
            assistant: AssistantConfig::default(),
            metrics_log: MetricsLogConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_memory_backend_created() {
        let result = create_stores(&memory_config());
        assert!(result.is_ok());
    }

    #[test]
    fn test_rest_backend_requires_section() {
        let mut config = memory_config();
        config.store_backend = StoreBackend::Rest;
        let result = create_stores(&config);
        assert!(matches!(result, Err(ClinsightError::Configuration(_))));
    }
}
