//! Server entity and load helpers

use serde::{Deserialize, Serialize};

use super::task::Task;

/// Express `load` as a percentage of `capacity`.
pub fn percent_of(load: u32, capacity: u32) -> f64 {
    if capacity == 0 {
        return 0.0;
    }
    f64::from(load) / f64::from(capacity) * 100.0
}

/// Coarse load band used when rendering a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadLevel {
    /// Below 50%
    Low,
    /// 50% up to 80%
    Elevated,
    /// 80% and above
    High,
}

impl LoadLevel {
    /// Classify a load percentage.
    pub fn from_percent(percent: f64) -> Self {
        if percent < 50.0 {
            LoadLevel::Low
        } else if percent < 80.0 {
            LoadLevel::Elevated
        } else {
            LoadLevel::High
        }
    }
}

/// A capacity-bounded server.
///
/// `load` always equals the summed weight of `tasks` between steps and never
/// exceeds `capacity`. Only the scheduler mutates load and tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Server {
    /// Position-independent identifier (1-based in the default pool)
    pub id: u32,
    /// Fixed maximum load
    pub capacity: u32,
    load: u32,
    tasks: Vec<Task>,
}

impl Server {
    /// Create an idle server.
    pub fn new(id: u32, capacity: u32) -> Self {
        Self {
            id,
            capacity,
            load: 0,
            tasks: Vec::new(),
        }
    }

    /// Current load in units
    pub fn load(&self) -> u32 {
        self.load
    }

    /// Assigned tasks, oldest first
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Whether the server has anything to complete
    pub fn is_busy(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Whether `task` fits without exceeding capacity
    pub fn can_admit(&self, task: &Task) -> bool {
        self.load.saturating_add(task.weight()) <= self.capacity
    }

    /// Units still free
    pub fn headroom(&self) -> u32 {
        self.capacity.saturating_sub(self.load)
    }

    /// Current load as a percentage of capacity
    pub fn load_percent(&self) -> f64 {
        percent_of(self.load, self.capacity)
    }

    /// Load band for display
    pub fn load_level(&self) -> LoadLevel {
        LoadLevel::from_percent(self.load_percent())
    }

    /// Place a task at the tail. Callers check `can_admit` first.
    pub(crate) fn admit(&mut self, task: Task) {
        self.load += task.weight();
        self.tasks.push(task);
    }

    /// Remove the oldest task, releasing its weight.
    pub(crate) fn complete_oldest(&mut self) -> Option<Task> {
        if self.tasks.is_empty() {
            return None;
        }
        let task = self.tasks.remove(0);
        self.load = self.load.saturating_sub(task.weight());
        Some(task)
    }
}
