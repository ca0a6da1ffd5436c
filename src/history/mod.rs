//! Linear, truncating snapshot history.
//!
//! Every computed step stores a full copy of the simulation state. Moving
//! the cursor back and forth restores stored copies without recomputation;
//! pushing a new snapshot from behind the latest one discards the redo
//! branch first.

mod manager;
mod snapshot;

pub use manager::HistoryManager;
pub use snapshot::Snapshot;
