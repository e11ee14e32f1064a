//! Chart rendering integration
//!
//! The painting primitive is an external collaborator: it takes a
//! container id and series data and hands back a handle that must be
//! destroyed before the container is drawn into again. The scheduler owns
//! those handles through named view slots.

pub mod renderer;

pub use renderer::{ChartHandle, ChartRenderer, ChartSeries, LogRenderer};
