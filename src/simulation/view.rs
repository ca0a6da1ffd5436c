//! Read-only projection of the controller for presentation layers.

use std::collections::VecDeque;

use serde::Serialize;

use crate::domain::{AssignmentLog, LoadLevel, Server, Statistics, Task};
use crate::scheduler::NextAction;

/// Per-server display data
#[derive(Debug, Clone, Serialize)]
pub struct ServerView<'a> {
    pub id: u32,
    pub load: u32,
    pub capacity: u32,
    pub load_percent: f64,
    pub level: LoadLevel,
    pub tasks: &'a [Task],
}

impl<'a> From<&'a Server> for ServerView<'a> {
    fn from(server: &'a Server) -> Self {
        Self {
            id: server.id,
            load: server.load(),
            capacity: server.capacity,
            load_percent: server.load_percent(),
            level: server.load_level(),
            tasks: server.tasks(),
        }
    }
}

/// Everything a front end needs to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct SimulationView<'a> {
    pub running: bool,
    /// Step number of the snapshot under the cursor
    pub step: Option<u64>,
    pub cursor: Option<usize>,
    pub history_len: usize,
    pub viewing_history: bool,
    pub can_rewind: bool,
    pub can_advance: bool,
    pub servers: Vec<ServerView<'a>>,
    pub queue: &'a VecDeque<Task>,
    pub statistics: &'a Statistics,
    pub log: &'a AssignmentLog,
    pub next_action: NextAction,
}
