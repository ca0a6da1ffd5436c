//! Task value type

use serde::Serialize;

use crate::error::{LoadbalError, Result};

/// Identifier handed out by the task source, starting at 1
pub type TaskId = u64;

/// A unit of work waiting in the queue or running on a server.
///
/// Tasks are plain values: once created they never change, and moving one
/// between the queue and a server is a copy. `new` is the only way to
/// build one, so every task in the engine has a positive weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    weight: u32,
}

impl Task {
    /// Create a task, rejecting non-positive weights at the boundary
    pub fn new(id: TaskId, weight: u32) -> Result<Self> {
        if weight == 0 {
            return Err(LoadbalError::InvalidTask { weight });
        }
        Ok(Self { id, weight })
    }

    /// Stable identifier
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Load units consumed while the task sits on a server
    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// Short display label, e.g. `T7`
    pub fn label(&self) -> String {
        format!("T{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_keeps_fields() {
        let task = Task::new(7, 25).unwrap();
        assert_eq!(task.id(), 7);
        assert_eq!(task.weight(), 25);
        assert_eq!(task.label(), "T7");
    }

    #[test]
    fn test_zero_weight_rejected() {
        let err = Task::new(1, 0).unwrap_err();
        assert!(matches!(err, LoadbalError::InvalidTask { weight: 0 }));
    }

    #[test]
    fn test_serializes_id_and_weight() {
        let task = Task::new(3, 12).unwrap();
        let value = serde_json::to_value(task).unwrap();
        assert_eq!(value, serde_json::json!({ "id": 3, "weight": 12 }));
    }
}
