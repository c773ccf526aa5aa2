//! Library Lifecycle
//!
//! Owns the current document: loading it (or bootstrapping from the seed),
//! resetting, importing, applying mutation intents, and handing every new
//! document to the write-behind persistence queue.

pub mod manager;
pub mod persist;

pub use manager::{FailureKind, LibraryManager, LifecycleState};
pub use persist::PersistQueue;
