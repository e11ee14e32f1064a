//! Submission ingestion

pub mod gateway;

pub use gateway::{IngestionGateway, Submission};
