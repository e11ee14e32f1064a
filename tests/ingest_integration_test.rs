//! End-to-end ingestion tests against a mock prediction service

use clinsight::adapters::chart::{ChartHandle, ChartRenderer, ChartSeries};
use clinsight::adapters::prediction::PredictionClient;
use clinsight::adapters::store::{MemoryStore, RecordStore};
use clinsight::config::{DashboardConfig, MetricsLogConfig, PredictionConfig, RetryConfig};
use clinsight::core::analytics::{aggregate, RiskProxyLabel};
use clinsight::core::ingest::{IngestionGateway, Submission};
use clinsight::core::view::{RefreshScheduler, RoleGate, ViewSlot};
use clinsight::domain::{
    ClinicalPayload, ClinsightError, Result, RiskLevel, Role, UserId, UserProfile,
};
use clinsight::logging::MetricsSink;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Renderer that remembers the last series painted into each container
#[derive(Default, Clone)]
struct RecordingRenderer {
    series: Arc<Mutex<HashMap<String, ChartSeries>>>,
}

struct NoopHandle;

impl ChartHandle for NoopHandle {
    fn destroy(&mut self) {}
}

impl ChartRenderer for RecordingRenderer {
    fn render(&self, container: &str, series: &ChartSeries) -> Result<Box<dyn ChartHandle>> {
        self.series
            .lock()
            .unwrap()
            .insert(container.to_string(), series.clone());
        Ok(Box::new(NoopHandle))
    }
}

fn prediction_client(base_url: &str) -> Arc<PredictionClient> {
    let config = PredictionConfig {
        base_url: base_url.to_string(),
        retry: RetryConfig {
            max_retries: 1,
            ..Default::default()
        },
        ..Default::default()
    };
    Arc::new(PredictionClient::new(config).unwrap())
}

struct Harness {
    store: Arc<MemoryStore>,
    gateway: IngestionGateway,
    scheduler: Arc<RefreshScheduler>,
    renderer: RecordingRenderer,
}

fn harness(base_url: &str, sink: Option<Arc<MetricsSink>>) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let predictions = prediction_client(base_url);
    let renderer = RecordingRenderer::default();

    let scheduler = Arc::new(RefreshScheduler::new(
        store.clone(),
        RoleGate::new(store.clone()),
        predictions.clone(),
        Arc::new(renderer.clone()),
        Arc::new(RiskProxyLabel),
        DashboardConfig::default(),
    ));

    let gateway = IngestionGateway::new(predictions, store.clone(), sink, scheduler.clone());

    Harness {
        store,
        gateway,
        scheduler,
        renderer,
    }
}

fn flu_submission() -> Submission {
    Submission {
        patient_name: Some("A. Patient".to_string()),
        payload: ClinicalPayload::from_loose_json(&serde_json::json!({
            "Age": 45, "Fever": "Yes"
        })),
        submitted_by: Some(UserId::new("uid-doc").unwrap()),
    }
}

#[tokio::test]
async fn test_submit_end_to_end_updates_distribution() {
    let mut server = mockito::Server::new_async().await;

    let disease_mock = server
        .mock("POST", "/predict-disease")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"top3": [{"disease": "Flu", "confidence": 0.8}]}"#)
        .create_async()
        .await;
    let outcome_mock = server
        .mock("POST", "/predict-outcome")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"risk": "HighRisk", "probability": 0.7}"#)
        .create_async()
        .await;

    let harness = harness(&server.url(), None);
    harness.store.insert_profile(UserProfile {
        id: UserId::new("uid-doc").unwrap(),
        email: "doc@clinic.example".to_string(),
        display_name: "Doc".to_string(),
        role: Role::Doctor,
    });
    harness
        .scheduler
        .on_signed_in(UserId::new("uid-doc").unwrap())
        .await;

    let record = harness.gateway.submit(flu_submission()).await.unwrap();

    assert_eq!(record.prediction.outcome.risk, RiskLevel::HighRisk);
    assert_eq!(record.prediction.outcome.probability, 0.7);
    assert_eq!(record.prediction.disease.primary().unwrap().disease, "Flu");
    assert_eq!(record.patient_name, "A. Patient");
    assert_eq!(record.age, 45);

    // The record appears in its own refresh cycle
    let window = harness.store.recent_records(200).await.unwrap();
    let aggregates = aggregate(&window, 5);
    assert_eq!(aggregates.distribution["Flu"], 1);

    assert!(harness.scheduler.is_rendered(ViewSlot::Distribution));
    let rendered = harness.renderer.series.lock().unwrap();
    let distribution = rendered.get(ViewSlot::Distribution.container_id()).unwrap();
    assert_eq!(distribution.labels, vec!["Flu"]);
    assert_eq!(distribution.values, vec![1.0]);
    drop(rendered);

    disease_mock.assert_async().await;
    outcome_mock.assert_async().await;
    harness.scheduler.on_signed_out().await;
}

#[tokio::test]
async fn test_disease_failure_writes_no_record() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/predict-disease")
        .with_status(500)
        .with_body("model not loaded")
        .create_async()
        .await;
    server
        .mock("POST", "/predict-outcome")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"risk": "Low Risk", "probability": 0.1}"#)
        .create_async()
        .await;

    let harness = harness(&server.url(), None);
    let result = harness.gateway.submit(flu_submission()).await;

    assert!(matches!(
        result,
        Err(ClinsightError::PredictionUnavailable(_))
    ));
    assert_eq!(harness.store.record_count(), 0);
}

#[tokio::test]
async fn test_outcome_failure_writes_no_record() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/predict-disease")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"top3": [{"disease": "Flu", "confidence": 0.8}]}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/predict-outcome")
        .with_status(503)
        .with_body("unavailable")
        .create_async()
        .await;

    let harness = harness(&server.url(), None);
    let result = harness.gateway.submit(flu_submission()).await;

    assert!(matches!(
        result,
        Err(ClinsightError::PredictionUnavailable(_))
    ));
    assert_eq!(harness.store.record_count(), 0);
}

#[tokio::test]
async fn test_out_of_range_probability_clamped_before_storage() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/predict-disease")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"top3": [{"disease": "Flu", "confidence": 1.4}]}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/predict-outcome")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"risk": "High Risk", "probability": 1.7}"#)
        .create_async()
        .await;

    let harness = harness(&server.url(), None);
    let record = harness.gateway.submit(flu_submission()).await.unwrap();

    assert_eq!(record.prediction.outcome.probability, 1.0);
    assert_eq!(record.prediction.disease.top3[0].confidence, 1.0);
}

#[tokio::test]
async fn test_missing_fields_take_documented_defaults() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/predict-disease")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"top3": []}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/predict-outcome")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"risk": "Low Risk", "probability": 0.05}"#)
        .create_async()
        .await;

    let harness = harness(&server.url(), None);
    let record = harness
        .gateway
        .submit(Submission {
            patient_name: None,
            payload: ClinicalPayload::from_loose_json(&serde_json::json!({})),
            submitted_by: None,
        })
        .await
        .unwrap();

    assert_eq!(record.patient_name, "Unknown");
    assert_eq!(record.age, 0);
    assert!(record.prediction.disease.primary().is_none());
}

#[tokio::test]
async fn test_metrics_sink_receives_both_models() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/predict-disease")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"top3": [{"disease": "Flu", "confidence": 0.8}]}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/predict-outcome")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"risk": "High Risk", "probability": 0.7}"#)
        .create_async()
        .await;
    let metrics_mock = server
        .mock("POST", "/log-metrics")
        .with_status(200)
        .with_body(r#"{"ok": true}"#)
        .expect(2)
        .create_async()
        .await;

    let sink = Arc::new(
        MetricsSink::new(&MetricsLogConfig {
            enabled: true,
            endpoint: format!("{}/log-metrics", server.url()),
            ..Default::default()
        })
        .unwrap(),
    );

    let harness = harness(&server.url(), Some(sink));
    harness.gateway.submit(flu_submission()).await.unwrap();

    // The emission is fire-and-forget; give the spawned task a moment
    tokio::time::sleep(std::time::Duration::from_millis(500)).await;
    metrics_mock.assert_async().await;
}

#[tokio::test]
async fn test_metrics_sink_failure_does_not_fail_submission() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/predict-disease")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"top3": [{"disease": "Flu", "confidence": 0.8}]}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/predict-outcome")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"risk": "High Risk", "probability": 0.7}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/log-metrics")
        .with_status(500)
        .with_body("sink down")
        .create_async()
        .await;

    let sink = Arc::new(
        MetricsSink::new(&MetricsLogConfig {
            enabled: true,
            endpoint: format!("{}/log-metrics", server.url()),
            ..Default::default()
        })
        .unwrap(),
    );

    let harness = harness(&server.url(), Some(sink));
    let result = harness.gateway.submit(flu_submission()).await;

    assert!(result.is_ok());
    assert_eq!(harness.store.record_count(), 1);
}

#[tokio::test]
async fn test_register_patient() {
    let server = mockito::Server::new_async().await;
    let harness = harness(&server.url(), None);

    let patient = harness
        .gateway
        .register_patient(clinsight::domain::NewPatientProfile {
            name: "P. Patient".to_string(),
            age: 58,
            gender: "Male".to_string(),
            phone: "555-0101".to_string(),
            blood_pressure: "High".to_string(),
            created_by: Some(UserId::new("uid-doc").unwrap()),
        })
        .await
        .unwrap();

    assert_eq!(patient.name, "P. Patient");
    assert!(!patient.id.as_str().is_empty());
}
