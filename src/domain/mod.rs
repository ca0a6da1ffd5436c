//! Domain types for loadbal
//!
//! This module contains the value types the engine moves around:
//! - Task: immutable unit of work with an id and a weight
//! - Server: capacity-bounded worker holding an ordered list of tasks
//! - AssignmentLogEntry: one assignment or completion event
//! - Statistics: aggregates derived from the live state

pub mod record;
pub mod server;
pub mod stats;
pub mod task;

pub use record::{AssignmentLog, AssignmentLogEntry, AssignmentStatus};
pub use server::{LoadLevel, Server, percent_of};
pub use stats::Statistics;
pub use task::{Task, TaskId};
