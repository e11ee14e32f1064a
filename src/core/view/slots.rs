//! Named, owned chart slots
//!
//! Each dashboard view owns at most one live chart handle, held in a
//! named slot. A slot's previous handle is always destroyed before a new
//! one is assigned, so repeated refreshes can never stack or leak chart
//! instances.

use crate::adapters::chart::ChartHandle;
use std::collections::HashMap;

/// The dashboard views that own a chart instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewSlot {
    /// Label distribution over the feed window
    Distribution,
    /// Admin: top-k diagnoses over the analytics window
    TopDiagnoses,
    /// Admin: day-bucketed record volume
    TimeSeries,
    /// Admin: mean outcome probability scalar
    MeanRisk,
    /// Admin: ROC curve
    Roc,
    /// Admin: confusion matrix
    Confusion,
    /// Admin: per-feature importance
    FeatureImportance,
}

impl ViewSlot {
    /// Container id the renderer paints this view into
    pub fn container_id(self) -> &'static str {
        match self {
            ViewSlot::Distribution => "chart-distribution",
            ViewSlot::TopDiagnoses => "chart-top-diagnoses",
            ViewSlot::TimeSeries => "chart-time-series",
            ViewSlot::MeanRisk => "chart-mean-risk",
            ViewSlot::Roc => "chart-roc",
            ViewSlot::Confusion => "chart-confusion",
            ViewSlot::FeatureImportance => "chart-feature-importance",
        }
    }
}

/// View-state record owning every live chart handle
#[derive(Default)]
pub struct ViewSlots {
    handles: HashMap<ViewSlot, Box<dyn ChartHandle>>,
}

impl ViewSlots {
    /// Create an empty slot record
    pub fn new() -> Self {
        Self::default()
    }

    /// Destroy and remove the handle in a slot, if any
    pub fn release(&mut self, slot: ViewSlot) {
        if let Some(mut handle) = self.handles.remove(&slot) {
            handle.destroy();
        }
    }

    /// Assign a new handle to a slot
    ///
    /// Any previous handle is destroyed first; [`release`](Self::release)
    /// beforehand is therefore optional but keeps the destroy-then-render
    /// ordering explicit at the call site.
    pub fn assign(&mut self, slot: ViewSlot, handle: Box<dyn ChartHandle>) {
        self.release(slot);
        self.handles.insert(slot, handle);
    }

    /// True when a slot currently holds a live handle
    pub fn is_rendered(&self, slot: ViewSlot) -> bool {
        self.handles.contains_key(&slot)
    }

    /// Destroy every live handle
    pub fn release_all(&mut self) {
        for (_, mut handle) in self.handles.drain() {
            handle.destroy();
        }
    }
}

impl Drop for ViewSlots {
    fn drop(&mut self) {
        self.release_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingHandle {
        destroyed: Arc<AtomicUsize>,
    }

    impl ChartHandle for CountingHandle {
        fn destroy(&mut self) {
            self.destroyed.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn handle(counter: &Arc<AtomicUsize>) -> Box<dyn ChartHandle> {
        Box::new(CountingHandle {
            destroyed: counter.clone(),
        })
    }

    #[test]
    fn test_assign_destroys_previous_handle() {
        let destroyed = Arc::new(AtomicUsize::new(0));
        let mut slots = ViewSlots::new();

        slots.assign(ViewSlot::Distribution, handle(&destroyed));
        assert_eq!(destroyed.load(Ordering::SeqCst), 0);

        slots.assign(ViewSlot::Distribution, handle(&destroyed));
        assert_eq!(destroyed.load(Ordering::SeqCst), 1);
        assert!(slots.is_rendered(ViewSlot::Distribution));
    }

    #[test]
    fn test_release_is_idempotent() {
        let destroyed = Arc::new(AtomicUsize::new(0));
        let mut slots = ViewSlots::new();

        slots.assign(ViewSlot::Roc, handle(&destroyed));
        slots.release(ViewSlot::Roc);
        slots.release(ViewSlot::Roc);
        assert_eq!(destroyed.load(Ordering::SeqCst), 1);
        assert!(!slots.is_rendered(ViewSlot::Roc));
    }

    #[test]
    fn test_drop_releases_everything() {
        let destroyed = Arc::new(AtomicUsize::new(0));
        {
            let mut slots = ViewSlots::new();
            slots.assign(ViewSlot::Distribution, handle(&destroyed));
            slots.assign(ViewSlot::TimeSeries, handle(&destroyed));
        }
        assert_eq!(destroyed.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_container_ids_are_distinct() {
        let slots = [
            ViewSlot::Distribution,
            ViewSlot::TopDiagnoses,
            ViewSlot::TimeSeries,
            ViewSlot::MeanRisk,
            ViewSlot::Roc,
            ViewSlot::Confusion,
            ViewSlot::FeatureImportance,
        ];
        let ids: std::collections::HashSet<_> =
            slots.iter().map(|s| s.container_id()).collect();
        assert_eq!(ids.len(), slots.len());
    }
}
