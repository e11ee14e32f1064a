//! Prediction service integration
//!
//! The inference service is an external collaborator exposing the disease
//! and outcome classifiers plus feature importances over HTTP.

pub mod client;
pub mod models;

pub use client::PredictionClient;
pub use models::FeatureImportance;
