//! Assignment log entries
//!
//! The log is an append-only, most-recent-first record of every assignment
//! and completion. It is only cleared by a full reset.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::server::{Server, percent_of};
use super::task::{Task, TaskId};

/// What happened to the task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    /// Task left the queue and landed on a server
    Assigned,
    /// Task finished and released its weight
    Completed,
}

/// One assignment or completion event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentLogEntry {
    /// Wall-clock annotation; never used by the step rule
    pub timestamp: DateTime<Utc>,
    pub task_id: TaskId,
    pub task_weight: u32,
    pub server_id: u32,
    /// Server load before the event, as a percentage of capacity
    pub load_before_pct: f64,
    /// Server load after the event, as a percentage of capacity
    pub load_after_pct: f64,
    pub status: AssignmentStatus,
}

impl AssignmentLogEntry {
    /// Build an entry for `task` on `server`, given the raw loads around the event.
    pub fn new(
        timestamp: DateTime<Utc>,
        task: &Task,
        server: &Server,
        load_before: u32,
        load_after: u32,
        status: AssignmentStatus,
    ) -> Self {
        Self {
            timestamp,
            task_id: task.id(),
            task_weight: task.weight(),
            server_id: server.id,
            load_before_pct: percent_of(load_before, server.capacity),
            load_after_pct: percent_of(load_after, server.capacity),
            status,
        }
    }

    /// Same event ignoring the timestamp
    pub fn same_event(&self, other: &Self) -> bool {
        self.task_id == other.task_id
            && self.task_weight == other.task_weight
            && self.server_id == other.server_id
            && self.load_before_pct == other.load_before_pct
            && self.load_after_pct == other.load_after_pct
            && self.status == other.status
    }
}

/// Most-recent-first event log
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignmentLog {
    entries: VecDeque<AssignmentLogEntry>,
}

impl AssignmentLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend entries in emission order, so the last one emitted ends up first.
    pub fn record<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = AssignmentLogEntry>,
    {
        for entry in entries {
            self.entries.push_front(entry);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate newest first
    pub fn iter(&self) -> impl Iterator<Item = &AssignmentLogEntry> {
        self.entries.iter()
    }

    /// The most recent event, if any
    pub fn latest(&self) -> Option<&AssignmentLogEntry> {
        self.entries.front()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
