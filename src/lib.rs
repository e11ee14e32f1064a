// Clinsight - Clinical Decision-Support Console
// Copyright (c) 2026 Clinsight Contributors
// Licensed under the MIT License

//! # Clinsight - Clinical Decision-Support Console
//!
//! Clinsight is the backend core of a clinical decision-support console:
//! clinicians submit patient feature vectors, an external inference service
//! returns disease and outcome predictions, and the console turns the
//! resulting append-only event stream into longitudinal analytics gated by
//! user role.
//!
//! ## Overview
//!
//! The library provides the core pipeline:
//! - **Ingesting** submissions: normalize the payload, call both
//!   classifiers, persist one immutable record
//! - **Aggregating** record windows: label distribution, top-k diagnoses,
//!   day-bucketed volume, mean risk
//! - **Measuring** classifier quality: ROC/AUC and confusion matrix over
//!   proxy-labeled historical records
//! - **Gating** admin analytics by resolved role, fail-closed
//! - **Refreshing** rendered views on sign-in, submission and a timer,
//!   with owned chart handles that never stack or leak
//!
//! ## Architecture
//!
//! Clinsight follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (ingest, analytics, view orchestration)
//! - [`adapters`] - External integrations (prediction service, document
//!   store, assistant, chart renderer)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and the metrics sink
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clinsight::config::load_config;
//! use clinsight::core::ingest::Submission;
//! use clinsight::core::Console;
//! use clinsight::domain::ClinicalPayload;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("clinsight.toml")?;
//!     let console = Console::from_config(&config)?;
//!
//!     let payload = ClinicalPayload::from_loose_json(&serde_json::json!({
//!         "Age": 45, "Fever": "Yes"
//!     }));
//!     let record = console
//!         .gateway()
//!         .submit(Submission {
//!             patient_name: None,
//!             payload,
//!             submitted_by: None,
//!         })
//!         .await?;
//!
//!     println!("Recorded {}", record.id);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Clinsight uses the [`domain::ClinsightError`] type for all errors. Only
//! `PredictionUnavailable` blocks a submission; analytics and rendering
//! failures degrade to a retained last-good view or an explicit
//! "not enough data" state.
//!
//! ```rust,no_run
//! use clinsight::domain::ClinsightError;
//!
//! fn example() -> Result<(), ClinsightError> {
//!     let config = clinsight::config::load_config("clinsight.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Clinsight uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(record_id = "rec-1", "Diagnostic record persisted");
//! warn!(labeled_pairs = 4, "Skipping ROC: not enough labeled pairs");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
