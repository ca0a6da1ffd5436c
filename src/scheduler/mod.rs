//! Scheduler module: the per-step assignment/completion rule.
//!
//! This module provides:
//! - **Step rule**: a pure function from `(servers, queue)` to the next
//!   servers, queue and log entries.
//! - **Preview**: a prediction of what the next step will do, for display.
//!
//! # Rule
//!
//! Each step first tries to move the queue head onto the least-loaded
//! server. Only when that does not happen does it complete the oldest task
//! on every busy server at once.
//!
//! # Example
//!
//! ```ignore
//! use loadbal::clock::SystemClock;
//! use loadbal::scheduler::{StepKind, step};
//!
//! let outcome = step(&servers, &queue, &SystemClock);
//! if outcome.kind == StepKind::Assigned {
//!     // exactly one task left the queue head
//! }
//! ```

mod preview;
mod step;

pub use preview::{NextAction, preview};
pub use step::{StepKind, StepOutcome, any_can_admit, select_target, step};
