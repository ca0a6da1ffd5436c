//! Prediction of the next step, for status display.

use std::collections::VecDeque;

use serde::Serialize;

use super::step::{any_can_admit, select_target};
use crate::domain::{Server, Task};

/// What the next computed step is going to do
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum NextAction {
    /// Queue empty and no server has work
    Idle,
    /// Queue empty; busy servers will complete their oldest task
    Drain { busy_servers: usize },
    /// Queue head goes to `server_id`, raising its load to `load_after`
    Assign { task: Task, server_id: u32, load_after: u32 },
    /// Queue head cannot be placed; `server_id` must free `shortfall` units
    Wait { task: Task, server_id: u32, shortfall: u32 },
}

/// Predict the next step using the same selection rule as `step`.
pub fn preview(servers: &[Server], queue: &VecDeque<Task>) -> NextAction {
    let busy_servers = servers.iter().filter(|s| s.is_busy()).count();

    let Some(task) = queue.front().copied() else {
        return if busy_servers == 0 {
            NextAction::Idle
        } else {
            NextAction::Drain { busy_servers }
        };
    };

    let Some(idx) = select_target(servers) else {
        return NextAction::Idle;
    };
    let target = &servers[idx];

    if any_can_admit(servers, &task) && target.can_admit(&task) {
        NextAction::Assign {
            task,
            server_id: target.id,
            load_after: target.load() + task.weight(),
        }
    } else {
        NextAction::Wait {
            task,
            server_id: target.id,
            shortfall: task.weight().saturating_sub(target.headroom()),
        }
    }
}

impl NextAction {
    /// One-line human description
    pub fn describe(&self) -> String {
        match self {
            NextAction::Idle => "Nothing queued and no active tasks; add tasks to continue.".to_string(),
            NextAction::Drain { busy_servers } => {
                format!("Queue empty; {} busy server(s) will each complete their oldest task.", busy_servers)
            }
            NextAction::Assign {
                task,
                server_id,
                load_after,
            } => format!(
                "{} ({} units) will be assigned to Server {}, new load {}.",
                task.label(),
                task.weight(),
                server_id,
                load_after
            ),
            NextAction::Wait {
                task,
                server_id,
                shortfall,
            } => format!(
                "{} ({} units) must wait; Server {} needs {} more units freed.",
                task.label(),
                task.weight(),
                server_id,
                shortfall
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: u64, weight: u32) -> Task {
        Task::new(id, weight).unwrap()
    }

    #[test]
    fn test_preview_idle() {
        let servers = vec![Server::new(1, 100)];
        assert_eq!(preview(&servers, &VecDeque::new()), NextAction::Idle);
    }

    #[test]
    fn test_preview_drain() {
        let mut servers = vec![Server::new(1, 100), Server::new(2, 100)];
        servers[1].admit(task(1, 10));
        assert_eq!(preview(&servers, &VecDeque::new()), NextAction::Drain { busy_servers: 1 });
    }

    #[test]
    fn test_preview_assign() {
        let mut servers = vec![Server::new(1, 100), Server::new(2, 100)];
        servers[0].admit(task(1, 10));
        let queue: VecDeque<_> = [task(2, 25)].into_iter().collect();

        assert_eq!(
            preview(&servers, &queue),
            NextAction::Assign {
                task: task(2, 25),
                server_id: 2,
                load_after: 25
            }
        );
    }

    #[test]
    fn test_preview_wait_reports_shortfall() {
        let mut servers = vec![Server::new(1, 100)];
        servers[0].admit(task(1, 90));
        let queue: VecDeque<_> = [task(2, 20)].into_iter().collect();

        let action = preview(&servers, &queue);
        assert_eq!(
            action,
            NextAction::Wait {
                task: task(2, 20),
                server_id: 1,
                shortfall: 10
            }
        );
        assert!(action.describe().contains("10 more units"));
    }

    #[test]
    fn test_preview_wait_when_only_busier_server_fits() {
        let mut servers = vec![Server::new(1, 100), Server::new(2, 40)];
        servers[0].admit(task(1, 20));
        servers[1].admit(task(2, 10));
        let queue: VecDeque<_> = [task(3, 35)].into_iter().collect();

        assert!(matches!(preview(&servers, &queue), NextAction::Wait { server_id: 2, .. }));
    }
}
