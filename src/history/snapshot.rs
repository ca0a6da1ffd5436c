//! Snapshot record

use serde::Serialize;

/// An immutable copy of the simulation state at one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot<S> {
    /// 0 for the initial state, +1 per computed step
    pub step: u64,
    state: S,
}

impl<S: Clone> Snapshot<S> {
    pub(crate) fn new(step: u64, state: S) -> Self {
        Self { step, state }
    }

    /// Borrow the stored state
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Copy of the stored state, safe to mutate as live state
    pub fn restore(&self) -> S {
        self.state.clone()
    }
}
