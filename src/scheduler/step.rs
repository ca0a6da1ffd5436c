//! The step rule.
//!
//! Assignment is attempted first:
//! - the queue head is considered only if some server could admit it;
//! - the target is always the minimum-load server (first in list order on
//!   ties), even when a busier server would have fit and it does not.
//!
//! Otherwise every busy server completes its oldest task in the same step.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::domain::{AssignmentLogEntry, AssignmentStatus, Server, Task};

/// What a step did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// The queue head moved onto a server
    Assigned,
    /// One or more servers finished their oldest task
    Completed,
    /// Nothing to assign and nothing to complete
    Idle,
}

/// Result of applying the rule once
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub servers: Vec<Server>,
    pub queue: VecDeque<Task>,
    /// Entries in emission order (server-list order for completions)
    pub entries: Vec<AssignmentLogEntry>,
    pub kind: StepKind,
}

/// Whether any server has room for `task`.
pub fn any_can_admit(servers: &[Server], task: &Task) -> bool {
    servers.iter().any(|s| s.can_admit(task))
}

/// Index of the minimum-load server; the earliest one wins ties.
pub fn select_target(servers: &[Server]) -> Option<usize> {
    servers
        .iter()
        .enumerate()
        .min_by_key(|(_, s)| s.load())
        .map(|(idx, _)| idx)
}

/// Apply the step rule to copies of `servers` and `queue`.
pub fn step(servers: &[Server], queue: &VecDeque<Task>, clock: &dyn Clock) -> StepOutcome {
    let mut servers = servers.to_vec();
    let mut queue = queue.clone();

    if let Some(entry) = try_assign(&mut servers, &mut queue, clock) {
        return StepOutcome {
            servers,
            queue,
            entries: vec![entry],
            kind: StepKind::Assigned,
        };
    }

    let entries = complete_all(&mut servers, clock);
    let kind = if entries.is_empty() {
        StepKind::Idle
    } else {
        StepKind::Completed
    };

    StepOutcome {
        servers,
        queue,
        entries,
        kind,
    }
}

fn try_assign(servers: &mut [Server], queue: &mut VecDeque<Task>, clock: &dyn Clock) -> Option<AssignmentLogEntry> {
    let task = *queue.front()?;

    if !any_can_admit(servers, &task) {
        tracing::debug!(task_id = task.id(), weight = task.weight(), "No server can admit queue head");
        return None;
    }

    let idx = select_target(servers)?;
    let target = &mut servers[idx];
    if !target.can_admit(&task) {
        tracing::debug!(
            task_id = task.id(),
            server_id = target.id,
            load = target.load(),
            "Least-loaded server cannot admit queue head, falling through"
        );
        return None;
    }

    let before = target.load();
    target.admit(task);
    queue.pop_front();

    tracing::debug!(task_id = task.id(), server_id = target.id, before, after = target.load(), "Assigned task");

    Some(AssignmentLogEntry::new(
        clock.now(),
        &task,
        target,
        before,
        target.load(),
        AssignmentStatus::Assigned,
    ))
}

fn complete_all(servers: &mut [Server], clock: &dyn Clock) -> Vec<AssignmentLogEntry> {
    let now = clock.now();
    let mut entries = Vec::new();

    for server in servers.iter_mut() {
        let before = server.load();
        if let Some(task) = server.complete_oldest() {
            tracing::debug!(task_id = task.id(), server_id = server.id, before, after = server.load(), "Completed task");
            entries.push(AssignmentLogEntry::new(
                now,
                &task,
                server,
                before,
                server.load(),
                AssignmentStatus::Completed,
            ));
        }
    }

    entries
}
