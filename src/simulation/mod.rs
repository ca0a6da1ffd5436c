//! Simulation orchestration
//!
//! - `SimState`: the live state, also the payload of every snapshot
//! - `SimulationController`: the single entry point for commands and views
//! - `WeightSource` / `TaskFactory`: pluggable task creation

mod controller;
mod source;
mod state;
mod view;

pub use controller::{Advance, Effect, SimulationController};
pub use source::{DEFAULT_MAX_WEIGHT, DEFAULT_MIN_WEIGHT, MAX_BATCH_SIZE, ScriptedWeights, TaskFactory, UniformWeights, WeightSource};
pub use state::SimState;
pub use view::{ServerView, SimulationView};
