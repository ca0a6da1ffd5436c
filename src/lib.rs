//! loadbal - stepped load-balancing simulator
//!
//! Weighted tasks are assigned to capacity-bounded servers one discrete step
//! at a time. Every step is stored as a snapshot so the simulation can be
//! rewound and replayed.

pub mod clock;
pub mod config;
pub mod console;
pub mod domain;
pub mod error;
pub mod history;
pub mod scheduler;
pub mod simulation;

pub use error::{LoadbalError, Result};
