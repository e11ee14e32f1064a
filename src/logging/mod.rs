//! Logging and observability
//!
//! Structured tracing for the console itself, plus the fire-and-forget
//! metrics sink that mirrors prediction events to an external monitoring
//! endpoint.

pub mod sink;
pub mod structured;

pub use sink::MetricsSink;
pub use structured::{init_logging, LoggingGuard};
