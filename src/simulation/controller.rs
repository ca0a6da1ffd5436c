//! Simulation controller.
//!
//! The controller owns the live state and is the only thing the outside
//! world talks to. Computed steps go through the scheduler and are recorded
//! in the history; navigation restores stored snapshots.
//!
//! Callers sharing one controller across threads must serialise access
//! (e.g. `Mutex<SimulationController>`); no two commands may interleave.

use std::collections::VecDeque;

use crate::clock::{Clock, SystemClock};
use crate::config::GlobalConfig;
use crate::domain::{AssignmentLog, Server, Statistics, Task};
use crate::error::{LoadbalError, Result};
use crate::history::HistoryManager;
use crate::scheduler::{self, NextAction, StepKind};

use super::source::{DEFAULT_MAX_WEIGHT, DEFAULT_MIN_WEIGHT, MAX_BATCH_SIZE, TaskFactory, UniformWeights, WeightSource};
use super::state::SimState;
use super::view::SimulationView;

/// Whether a command changed anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Applied,
    NoEffect,
}

/// What `advance` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Ran the scheduler and stored a new snapshot
    Stepped { step: u64, kind: StepKind },
    /// Restored the next stored snapshot
    Replayed { step: u64 },
    /// Paused, so nothing happened
    NoEffect,
}

/// Owns live state, history and run flag.
pub struct SimulationController {
    initial_servers: Vec<Server>,
    state: SimState,
    history: HistoryManager<SimState>,
    running: bool,
    tasks: TaskFactory,
    weights: Box<dyn WeightSource>,
    clock: Box<dyn Clock>,
}

impl SimulationController {
    /// Create a paused controller over `servers` with random weights and
    /// wall-clock timestamps.
    pub fn new(servers: Vec<Server>) -> Result<Self> {
        let weights = UniformWeights::new(DEFAULT_MIN_WEIGHT, DEFAULT_MAX_WEIGHT)?;
        Ok(Self {
            initial_servers: servers.clone(),
            state: SimState::new(servers),
            history: HistoryManager::new(),
            running: false,
            tasks: TaskFactory::new(),
            weights: Box::new(weights),
            clock: Box::new(SystemClock),
        })
    }

    /// Create a controller from validated configuration.
    pub fn from_config(config: &GlobalConfig) -> Result<Self> {
        config.validate()?;
        let weights = UniformWeights::new(config.tasks.min_weight, config.tasks.max_weight)?;
        Ok(Self::new(config.server_pool())?.with_weights(Box::new(weights)))
    }

    /// Replace the weight source.
    pub fn with_weights(mut self, weights: Box<dyn WeightSource>) -> Self {
        self.weights = weights;
        self
    }

    /// Replace the clock used for log timestamps.
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    //=== Commands ===

    /// Begin accepting steps; records the initial snapshot on first start.
    pub fn start(&mut self) -> Effect {
        if self.running {
            return Effect::NoEffect;
        }
        self.running = true;
        if self.history.is_empty() {
            self.history.push(self.state.clone());
        }
        log::info!("Simulation started at step {:?}", self.current_step());
        Effect::Applied
    }

    /// Pause; state and history are untouched.
    pub fn stop(&mut self) -> Effect {
        if !self.running {
            return Effect::NoEffect;
        }
        self.running = false;
        log::info!("Simulation paused at step {:?}", self.current_step());
        Effect::Applied
    }

    /// Append a task with the given weight to the queue.
    ///
    /// A zero weight is rejected even while paused. While paused nothing is
    /// queued and `Ok(None)` is returned. Enqueueing from a rewound position
    /// discards the redo branch.
    pub fn enqueue_task(&mut self, weight: u32) -> Result<Option<Task>> {
        if weight == 0 {
            return Err(LoadbalError::InvalidTask { weight });
        }
        if !self.running {
            log::debug!("Ignoring enqueue of weight {} while paused", weight);
            return Ok(None);
        }

        let discarded = self.history.truncate_after_cursor();
        if discarded > 0 {
            log::info!("Enqueue from history discarded {} future snapshot(s)", discarded);
        }

        let task = self.tasks.create(weight)?;
        self.state.queue.push_back(task);
        log::debug!("Enqueued {} with weight {}", task.label(), task.weight());
        Ok(Some(task))
    }

    /// Enqueue `count` tasks with weights from the weight source.
    ///
    /// Counts above `MAX_BATCH_SIZE` are rejected before anything is queued.
    pub fn enqueue_random(&mut self, count: usize) -> Result<Vec<Task>> {
        if count > MAX_BATCH_SIZE {
            return Err(LoadbalError::InvalidBatch {
                count,
                max: MAX_BATCH_SIZE,
            });
        }
        let mut added = Vec::new();
        for _ in 0..count {
            let weight = self.weights.next_weight();
            match self.enqueue_task(weight)? {
                Some(task) => added.push(task),
                None => break,
            }
        }
        Ok(added)
    }

    /// Perform one step, or replay one stored snapshot if rewound.
    pub fn advance(&mut self) -> Advance {
        if !self.running {
            return Advance::NoEffect;
        }

        if !self.history.is_at_latest()
            && let Some(snapshot) = self.history.forward()
        {
            let step = snapshot.step;
            self.state = snapshot.restore();
            log::debug!("Replayed snapshot for step {}", step);
            return Advance::Replayed { step };
        }

        let outcome = scheduler::step(&self.state.servers, &self.state.queue, self.clock.as_ref());
        let kind = outcome.kind;
        self.state.apply(outcome);
        let step = self.history.push(self.state.clone()).step;

        log::debug!("Computed step {} ({:?})", step, kind);
        Advance::Stepped { step, kind }
    }

    /// Restore the previous snapshot; no effect at the earliest one.
    pub fn rewind(&mut self) -> Effect {
        match self.history.back() {
            Some(snapshot) => {
                self.state = snapshot.restore();
                log::debug!("Rewound to step {}", snapshot.step);
                Effect::Applied
            }
            None => Effect::NoEffect,
        }
    }

    /// Back to the initial servers, empty queue, log and history; paused.
    pub fn reset(&mut self) {
        self.state = SimState::new(self.initial_servers.clone());
        self.history.clear();
        self.tasks.reset();
        self.running = false;
        log::info!("Simulation reset");
    }

    //=== Views ===

    pub fn servers(&self) -> &[Server] {
        &self.state.servers
    }

    pub fn queue(&self) -> &VecDeque<Task> {
        &self.state.queue
    }

    pub fn statistics(&self) -> &Statistics {
        &self.state.statistics
    }

    /// Events, most recent first
    pub fn log(&self) -> &AssignmentLog {
        &self.state.log
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// History cursor; `None` before the first start
    pub fn cursor(&self) -> Option<usize> {
        self.history.cursor()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &HistoryManager<SimState> {
        &self.history
    }

    /// Step number of the snapshot under the cursor
    pub fn current_step(&self) -> Option<u64> {
        self.history.current().map(|s| s.step)
    }

    /// True when rewound behind the latest snapshot
    pub fn is_viewing_history(&self) -> bool {
        !self.history.is_at_latest()
    }

    pub fn can_rewind(&self) -> bool {
        self.history.can_back()
    }

    /// False when paused, or at the latest snapshot with nothing left to do.
    pub fn can_advance(&self) -> bool {
        self.running
            && (self.history.can_forward() || !self.state.queue.is_empty() || self.state.has_active_tasks())
    }

    /// What the next computed step would do from the live state
    pub fn preview(&self) -> NextAction {
        scheduler::preview(&self.state.servers, &self.state.queue)
    }

    /// Serialisable projection of everything above
    pub fn view(&self) -> SimulationView<'_> {
        SimulationView {
            running: self.running,
            step: self.current_step(),
            cursor: self.cursor(),
            history_len: self.history_len(),
            viewing_history: self.is_viewing_history(),
            can_rewind: self.can_rewind(),
            can_advance: self.can_advance(),
            servers: self.state.servers.iter().map(Into::into).collect(),
            queue: &self.state.queue,
            statistics: &self.state.statistics,
            log: &self.state.log,
            next_action: self.preview(),
        }
    }
}
