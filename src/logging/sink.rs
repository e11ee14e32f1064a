//! Prediction metrics-logging sink
//!
//! Every successful submission is mirrored to an external monitoring
//! endpoint as a fire-and-forget event: model name, the normalized payload
//! snapshot, a prediction summary, and the submitting user. Failures here
//! are reported and never affect the submission that triggered them.

use crate::config::MetricsLogConfig;
use crate::domain::{ClinicalPayload, ClinsightError, Result, UserId};
use chrono::Utc;
use serde_json::json;
use std::time::Duration;

/// Fire-and-forget sink for prediction metrics events
pub struct MetricsSink {
    endpoint: String,
    disease_model: String,
    outcome_model: String,
    http_client: reqwest::Client,
}

impl MetricsSink {
    /// Create a new metrics sink from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if metrics logging is not enabled or the HTTP
    /// client cannot be built.
    pub fn new(config: &MetricsLogConfig) -> Result<Self> {
        if !config.enabled {
            return Err(ClinsightError::Configuration(
                "Metrics logging is not enabled".to_string(),
            ));
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| {
                ClinsightError::MetricsLogging(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            disease_model: config.disease_model.clone(),
            outcome_model: config.outcome_model.clone(),
            http_client,
        })
    }

    /// Model name logged for disease predictions
    pub fn disease_model(&self) -> &str {
        &self.disease_model
    }

    /// Model name logged for outcome predictions
    pub fn outcome_model(&self) -> &str {
        &self.outcome_model
    }

    /// Post one prediction event to the monitoring endpoint
    ///
    /// # Arguments
    ///
    /// * `model` - Logical model name (disease or outcome)
    /// * `payload` - Normalized payload the prediction was made from
    /// * `prediction` - Prediction summary as a JSON value
    /// * `user` - Submitting user, if known
    ///
    /// # Errors
    ///
    /// Returns an error on connection failure or a non-success status.
    /// Callers treat this as report-only.
    pub async fn log_prediction(
        &self,
        model: &str,
        payload: &ClinicalPayload,
        prediction: serde_json::Value,
        user: Option<&UserId>,
    ) -> Result<()> {
        let event = json!({
            "model": model,
            "payload": payload.to_request_body(),
            "prediction": prediction,
            "user": user.map(|u| u.as_str()),
            "ts": Utc::now().to_rfc3339(),
        });

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&event)
            .send()
            .await
            .map_err(|e| ClinsightError::MetricsLogging(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClinsightError::MetricsLogging(format!(
                "Metrics endpoint returned status {status}: {body}"
            )));
        }

        tracing::debug!(model = model, "Logged prediction metrics event");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MetricsLogConfig;

    #[test]
    fn test_sink_requires_enabled_config() {
        let config = MetricsLogConfig::default();
        let result = MetricsSink::new(&config);
        assert!(result.is_err());
    }

    #[test]
    fn test_sink_model_names() {
        let config = MetricsLogConfig {
            enabled: true,
            endpoint: "http://localhost:5000/log-metrics".to_string(),
            ..Default::default()
        };
        let sink = MetricsSink::new(&config).unwrap();
        assert_eq!(sink.disease_model(), "disease-top3");
        assert_eq!(sink.outcome_model(), "outcome-risk");
    }
}
