//! Live simulation state

use std::collections::VecDeque;

use serde::Serialize;

use crate::domain::{AssignmentLog, Server, Statistics, Task};
use crate::scheduler::{StepKind, StepOutcome};

/// Everything a snapshot captures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimState {
    pub servers: Vec<Server>,
    pub queue: VecDeque<Task>,
    pub statistics: Statistics,
    pub log: AssignmentLog,
}

impl SimState {
    /// Fresh state over `servers` with an empty queue and log.
    pub fn new(servers: Vec<Server>) -> Self {
        let mut statistics = Statistics::default();
        statistics.refresh(&servers);
        Self {
            servers,
            queue: VecDeque::new(),
            statistics,
            log: AssignmentLog::new(),
        }
    }

    /// Whether any server still holds tasks
    pub fn has_active_tasks(&self) -> bool {
        self.servers.iter().any(|s| s.is_busy())
    }

    /// Replace servers and queue with a step result and fold its events into
    /// the statistics and log.
    pub(crate) fn apply(&mut self, outcome: StepOutcome) {
        match outcome.kind {
            StepKind::Assigned => self.statistics.total_tasks += 1,
            StepKind::Completed => self.statistics.completed_tasks += outcome.entries.len() as u64,
            StepKind::Idle => {}
        }

        self.servers = outcome.servers;
        self.queue = outcome.queue;
        self.log.record(outcome.entries);
        self.statistics.refresh(&self.servers);
    }
}
