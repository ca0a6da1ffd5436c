//! Task creation: ids from a counter, weights from an injected source.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{Task, TaskId};
use crate::error::{LoadbalError, Result};

/// Default inclusive weight range for generated tasks.
pub const DEFAULT_MIN_WEIGHT: u32 = 10;
pub const DEFAULT_MAX_WEIGHT: u32 = 39;

/// Largest number of tasks one `enqueue_random` call accepts.
pub const MAX_BATCH_SIZE: usize = 1000;

/// Supplies weights for generated tasks
pub trait WeightSource: Send {
    fn next_weight(&mut self) -> u32;
}

/// Uniform weights over an inclusive range
#[derive(Debug, Clone)]
pub struct UniformWeights {
    min: u32,
    max: u32,
    rng: StdRng,
}

impl UniformWeights {
    /// Seeded from the operating system.
    pub fn new(min: u32, max: u32) -> Result<Self> {
        Self::validate(min, max)?;
        Ok(Self {
            min,
            max,
            rng: StdRng::from_os_rng(),
        })
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(min: u32, max: u32, seed: u64) -> Result<Self> {
        Self::validate(min, max)?;
        Ok(Self {
            min,
            max,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    fn validate(min: u32, max: u32) -> Result<()> {
        if min == 0 || min > max {
            return Err(LoadbalError::InvalidConfig(format!(
                "weight range must satisfy 0 < min <= max, got {}..={}",
                min, max
            )));
        }
        Ok(())
    }
}

impl WeightSource for UniformWeights {
    fn next_weight(&mut self) -> u32 {
        self.rng.random_range(self.min..=self.max)
    }
}

/// Cycles through a fixed list of weights
#[derive(Debug, Clone)]
pub struct ScriptedWeights {
    weights: Vec<u32>,
    pos: usize,
}

impl ScriptedWeights {
    pub fn new(weights: Vec<u32>) -> Result<Self> {
        if weights.is_empty() {
            return Err(LoadbalError::InvalidConfig("scripted weights must not be empty".to_string()));
        }
        if let Some(&bad) = weights.iter().find(|&&w| w == 0) {
            return Err(LoadbalError::InvalidTask { weight: bad });
        }
        Ok(Self { weights, pos: 0 })
    }
}

impl WeightSource for ScriptedWeights {
    fn next_weight(&mut self) -> u32 {
        let weight = self.weights[self.pos % self.weights.len()];
        self.pos += 1;
        weight
    }
}

/// Hands out task ids starting at 1
#[derive(Debug, Clone)]
pub struct TaskFactory {
    next_id: TaskId,
}

impl Default for TaskFactory {
    fn default() -> Self {
        Self { next_id: 1 }
    }
}

impl TaskFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next successful `create` will use
    pub fn peek_id(&self) -> TaskId {
        self.next_id
    }

    /// Create a task; the id is only consumed when the weight is valid.
    pub fn create(&mut self, weight: u32) -> Result<Task> {
        let task = Task::new(self.next_id, weight)?;
        self.next_id += 1;
        Ok(task)
    }

    pub fn reset(&mut self) {
        self.next_id = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_weights_stay_in_range() {
        let mut source = UniformWeights::seeded(10, 39, 42).unwrap();
        for _ in 0..500 {
            let w = source.next_weight();
            assert!((10..=39).contains(&w), "weight {} out of range", w);
        }
    }

    #[test]
    fn test_uniform_weights_seed_is_reproducible() {
        let mut a = UniformWeights::seeded(1, 100, 7).unwrap();
        let mut b = UniformWeights::seeded(1, 100, 7).unwrap();
        let xs: Vec<_> = (0..20).map(|_| a.next_weight()).collect();
        let ys: Vec<_> = (0..20).map(|_| b.next_weight()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_uniform_weights_reject_bad_range() {
        assert!(UniformWeights::new(0, 10).is_err());
        assert!(UniformWeights::new(20, 10).is_err());
        assert!(UniformWeights::new(5, 5).is_ok());
    }

    #[test]
    fn test_scripted_weights_cycle() {
        let mut source = ScriptedWeights::new(vec![5, 7]).unwrap();
        let seq: Vec<_> = (0..5).map(|_| source.next_weight()).collect();
        assert_eq!(seq, vec![5, 7, 5, 7, 5]);
    }

    #[test]
    fn test_scripted_weights_validation() {
        assert!(ScriptedWeights::new(vec![]).is_err());
        assert!(matches!(
            ScriptedWeights::new(vec![3, 0]),
            Err(LoadbalError::InvalidTask { weight: 0 })
        ));
    }

    #[test]
    fn test_task_factory_ids() {
        let mut factory = TaskFactory::new();
        assert_eq!(factory.create(10).unwrap().id(), 1);
        assert!(factory.create(0).is_err());
        assert_eq!(factory.peek_id(), 2);
        assert_eq!(factory.create(10).unwrap().id(), 2);

        factory.reset();
        assert_eq!(factory.peek_id(), 1);
    }
}
