//! Output
//!
//! Per-step snapshot rows and their collector. Interaction/travel sinks
//! live in the events module.

pub mod snapshot;

pub use snapshot::{SnapshotCollector, SnapshotRow};
