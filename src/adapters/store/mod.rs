//! Record and profile store integration
//!
//! The document store is an external collaborator; this module defines
//! the contracts the console consumes ([`RecordStore`], [`ProfileStore`])
//! and provides two backends: in-memory (development, tests) and REST.

pub mod factory;
pub mod memory;
pub mod rest;
pub mod traits;

pub use factory::create_stores;
pub use memory::MemoryStore;
pub use rest::RestStore;
pub use traits::{ProfileStore, RecordStore};
