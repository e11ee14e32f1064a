//! Chart renderer contract and the tracing-backed implementation
//!
//! `render(container, series) -> handle` plus `handle.destroy()` is the
//! whole contract. The default implementation paints into the structured
//! log, which is enough for headless runs and tests; a real UI front-end
//! supplies its own renderer.

use crate::domain::{ClinsightError, Result};

/// Series data handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// Chart title
    pub title: String,

    /// Category labels, parallel to `values`
    pub labels: Vec<String>,

    /// Series values, parallel to `labels`
    pub values: Vec<f64>,
}

impl ChartSeries {
    /// Build a series from parallel label/value pairs
    pub fn new(
        title: impl Into<String>,
        pairs: impl IntoIterator<Item = (String, f64)>,
    ) -> Self {
        let (labels, values) = pairs.into_iter().unzip();
        Self {
            title: title.into(),
            labels,
            values,
        }
    }
}

/// A live chart instance
///
/// Must be destroyed before its container is rendered into again; the
/// scheduler's view slots enforce this.
pub trait ChartHandle: Send {
    /// Release the chart instance
    fn destroy(&mut self);
}

/// Chart painting contract
pub trait ChartRenderer: Send + Sync {
    /// Paint a series into a container, returning the live handle
    ///
    /// # Errors
    ///
    /// Returns an error if the series cannot be painted (e.g. label and
    /// value lengths differ).
    fn render(&self, container: &str, series: &ChartSeries) -> Result<Box<dyn ChartHandle>>;
}

/// Renderer that paints into the structured log
#[derive(Debug, Default)]
pub struct LogRenderer;

impl LogRenderer {
    pub fn new() -> Self {
        Self
    }
}

struct LogChartHandle {
    container: String,
    destroyed: bool,
}

impl ChartHandle for LogChartHandle {
    fn destroy(&mut self) {
        if !self.destroyed {
            self.destroyed = true;
            tracing::debug!(container = %self.container, "Chart destroyed");
        }
    }
}

impl Drop for LogChartHandle {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl ChartRenderer for LogRenderer {
    fn render(&self, container: &str, series: &ChartSeries) -> Result<Box<dyn ChartHandle>> {
        if series.labels.len() != series.values.len() {
            return Err(ClinsightError::Render(format!(
                "Series '{}' has {} labels but {} values",
                series.title,
                series.labels.len(),
                series.values.len()
            )));
        }

        tracing::info!(
            container = container,
            title = %series.title,
            points = series.labels.len(),
            "Chart rendered"
        );

        Ok(Box::new(LogChartHandle {
            container: container.to_string(),
            destroyed: false,
        }))
    }
}
