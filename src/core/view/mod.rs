//! View orchestration
//!
//! Role gating, owned chart slots, and the refresh scheduler that ties
//! window queries, analytics and rendering together.

pub mod gate;
pub mod refresh;
pub mod slots;

pub use gate::RoleGate;
pub use refresh::{RefreshScheduler, RefreshTrigger};
pub use slots::{ViewSlot, ViewSlots};
