//! Console wiring - builds the component graph from configuration
//!
//! This is the composition root used by the CLI commands: stores,
//! prediction client, metrics sink, scheduler and gateway are created
//! once here and shared through `Arc` handles.

use crate::adapters::assistant::AssistantClient;
use crate::adapters::chart::{ChartRenderer, LogRenderer};
use crate::adapters::prediction::PredictionClient;
use crate::adapters::store::create_stores;
use crate::config::ClinsightConfig;
use crate::core::analytics::RiskProxyLabel;
use crate::core::ingest::IngestionGateway;
use crate::core::view::{RefreshScheduler, RoleGate};
use crate::domain::Result;
use crate::logging::MetricsSink;
use std::sync::Arc;

/// Assembled console core
pub struct Console {
    gateway: IngestionGateway,
    scheduler: Arc<RefreshScheduler>,
    assistant: Option<AssistantClient>,
}

impl Console {
    /// Build the console from configuration with the default renderer
    pub fn from_config(config: &ClinsightConfig) -> Result<Self> {
        Self::with_renderer(config, Arc::new(LogRenderer::new()))
    }

    /// Build the console from configuration with an explicit renderer
    ///
    /// # Errors
    ///
    /// Returns an error if any collaborator client cannot be constructed.
    pub fn with_renderer(
        config: &ClinsightConfig,
        renderer: Arc<dyn ChartRenderer>,
    ) -> Result<Self> {
        let (records, profiles) = create_stores(config)?;
        let predictions = Arc::new(PredictionClient::new(config.prediction.clone())?);

        let sink = if config.metrics_log.enabled {
            Some(Arc::new(MetricsSink::new(&config.metrics_log)?))
        } else {
            None
        };

        let scheduler = Arc::new(RefreshScheduler::new(
            records.clone(),
            RoleGate::new(profiles),
            predictions.clone(),
            renderer,
            Arc::new(RiskProxyLabel),
            config.dashboard.clone(),
        ));

        let gateway = IngestionGateway::new(predictions, records, sink, scheduler.clone());

        let assistant = if config.assistant.enabled {
            Some(AssistantClient::new(&config.assistant)?)
        } else {
            None
        };

        Ok(Self {
            gateway,
            scheduler,
            assistant,
        })
    }

    /// The ingestion gateway
    pub fn gateway(&self) -> &IngestionGateway {
        &self.gateway
    }

    /// The refresh scheduler
    pub fn scheduler(&self) -> &Arc<RefreshScheduler> {
        &self.scheduler
    }

    /// The assistant client, when enabled
    pub fn assistant(&self) -> Option<&AssistantClient> {
        self.assistant.as_ref()
    }
}
