//! Prediction service HTTP client
//!
//! This client fronts the external inference service. Both classification
//! endpoints take the same normalized payload; transient failures are
//! retried with exponential backoff per the configured retry policy, and
//! every failure surfaces as a [`PredictionError`] so submissions can be
//! aborted cleanly.

use crate::config::PredictionConfig;
use crate::domain::errors::PredictionError;
use crate::domain::{ClinicalPayload, ClinsightError, DiseaseResult, OutcomeResult, Result};
use base64::{engine::general_purpose, Engine as _};
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use std::time::Duration;

use super::models::{DiseaseResponse, FeatureImportance, OutcomeResponse};

/// HTTP client for the disease and outcome classifiers
///
/// # Example
///
/// ```no_run
/// use clinsight::adapters::prediction::PredictionClient;
/// use clinsight::config::PredictionConfig;
/// use clinsight::domain::ClinicalPayload;
///
/// # async fn example() -> clinsight::domain::Result<()> {
/// let client = PredictionClient::new(PredictionConfig::default())?;
/// let payload = ClinicalPayload::from_loose_json(&serde_json::json!({"Age": 45}));
/// let disease = client.predict_disease(&payload).await?;
/// # Ok(())
/// # }
/// ```
pub struct PredictionClient {
    base_url: String,
    client: Client,
    config: PredictionConfig,
}

impl PredictionClient {
    /// Create a new prediction client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: PredictionConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();

        let mut client_builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30));

        if !config.tls_verify {
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder.build().map_err(|e| {
            ClinsightError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            base_url,
            client,
            config,
        })
    }

    /// Base URL of the inference service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Classify the payload into ranked disease candidates
    pub async fn predict_disease(&self, payload: &ClinicalPayload) -> Result<DiseaseResult> {
        let body = payload.to_request_body();
        let response: DiseaseResponse = self.post_json("/predict-disease", &body).await?;
        let result = DiseaseResult::try_from(response).map_err(ClinsightError::from)?;

        tracing::debug!(
            candidates = result.top3.len(),
            primary = result.primary().map(|c| c.disease.as_str()).unwrap_or("none"),
            "Disease prediction received"
        );

        Ok(result)
    }

    /// Classify the payload into a risk category and probability
    pub async fn predict_outcome(&self, payload: &ClinicalPayload) -> Result<OutcomeResult> {
        let body = payload.to_request_body();
        let response: OutcomeResponse = self.post_json("/predict-outcome", &body).await?;
        let result = OutcomeResult::try_from(response).map_err(ClinsightError::from)?;

        tracing::debug!(
            risk = ?result.risk,
            probability = result.probability,
            "Outcome prediction received"
        );

        Ok(result)
    }

    /// Fetch per-feature importance scores from the disease classifier
    ///
    /// Rendered as an admin chart; an empty list means the model does not
    /// expose importances.
    pub async fn feature_importance(&self) -> Result<Vec<FeatureImportance>> {
        let url = format!("{}/feature-importance", self.base_url);

        let importances = self
            .retry_request(|| async {
                let mut request = self.client.get(&url);
                if let Some(auth) = self.auth_header_value() {
                    request = request.header("Authorization", auth);
                }

                let resp = request
                    .send()
                    .await
                    .map_err(|e| connection_error(e.to_string()))?;

                if !resp.status().is_success() {
                    return Err(status_error(resp).await);
                }

                resp.json::<Vec<FeatureImportance>>().await.map_err(|e| {
                    ClinsightError::PredictionUnavailable(PredictionError::InvalidResponse(
                        e.to_string(),
                    ))
                })
            })
            .await?;

        Ok(importances)
    }

    /// Build authorization header value for Basic auth, if configured
    fn auth_header_value(&self) -> Option<String> {
        if let (Some(ref username), Some(ref password)) =
            (&self.config.username, &self.config.password)
        {
            let credentials = format!("{username}:{}", password.expose_secret().as_ref());
            let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
            Some(format!("Basic {encoded}"))
        } else {
            None
        }
    }

    /// POST a JSON body and deserialize a JSON response
    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T> {
        let url = format!("{}{path}", self.base_url);

        self.retry_request(|| async {
            let mut request = self.client.post(&url).json(body);
            if let Some(auth) = self.auth_header_value() {
                request = request.header("Authorization", auth);
            }

            let resp = request
                .send()
                .await
                .map_err(|e| connection_error(e.to_string()))?;

            if !resp.status().is_success() {
                return Err(status_error(resp).await);
            }

            resp.json::<T>().await.map_err(|e| {
                ClinsightError::PredictionUnavailable(PredictionError::InvalidResponse(
                    e.to_string(),
                ))
            })
        })
        .await
    }

    /// Retry a request with exponential backoff
    async fn retry_request<F, T, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let max_retries = self.config.retry.max_retries;
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    attempt += 1;
                    if attempt >= max_retries {
                        return Err(e);
                    }

                    let delay_ms = self.config.retry.initial_delay_ms
                        * (self
                            .config
                            .retry
                            .backoff_multiplier
                            .powf((attempt - 1) as f64) as u64);
                    let delay_ms = delay_ms.min(self.config.retry.max_delay_ms);

                    tracing::warn!(
                        attempt = attempt,
                        max_retries = max_retries,
                        delay_ms = delay_ms,
                        error = %e,
                        "Retrying prediction request after error"
                    );

                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }
}

fn connection_error(message: String) -> ClinsightError {
    ClinsightError::PredictionUnavailable(PredictionError::ConnectionFailed(message))
}

async fn status_error(resp: reqwest::Response) -> ClinsightError {
    let status = resp.status().as_u16();
    let message = resp.text().await.unwrap_or_default();
    let error = if (500..600).contains(&status) {
        PredictionError::ServerError { status, message }
    } else {
        PredictionError::ClientError { status, message }
    };
    ClinsightError::PredictionUnavailable(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_strips_trailing_slash() {
        let config = PredictionConfig {
            base_url: "http://localhost:5000/".to_string(),
            ..Default::default()
        };
        let client = PredictionClient::new(config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn test_auth_header_requires_both_credentials() {
        let config = PredictionConfig {
            username: Some("svc".to_string()),
            ..Default::default()
        };
        let client = PredictionClient::new(config).unwrap();
        assert!(client.auth_header_value().is_none());
    }

    #[test]
    fn test_auth_header_is_basic() {
        use secrecy::Secret;

        let config = PredictionConfig {
            username: Some("svc".to_string()),
            password: Some(Secret::new("pass".to_string().into())),
            ..Default::default()
        };
        let client = PredictionClient::new(config).unwrap();
        let header = client.auth_header_value().unwrap();
        assert!(header.starts_with("Basic "));
    }
}
