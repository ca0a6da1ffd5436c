//! Aggregate statistics over the live state

use serde::{Deserialize, Serialize};

use super::server::Server;

/// Counters and averages shown alongside the servers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Tasks moved from the queue onto a server
    pub total_tasks: u64,
    /// Completion events (one step may add several)
    pub completed_tasks: u64,
    /// Mean load across servers, in load units
    pub average_load: f64,
}

impl Statistics {
    /// Recompute the derived average from the current servers.
    pub fn refresh(&mut self, servers: &[Server]) {
        self.average_load = average_load(servers);
    }
}

/// Mean server load in units; zero for an empty pool.
pub fn average_load(servers: &[Server]) -> f64 {
    if servers.is_empty() {
        return 0.0;
    }
    let total: u64 = servers.iter().map(|s| u64::from(s.load())).sum();
    total as f64 / servers.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Task;

    #[test]
    fn test_default_is_zeroed() {
        let stats = Statistics::default();
        assert_eq!(stats.total_tasks, 0);
        assert_eq!(stats.completed_tasks, 0);
        assert_eq!(stats.average_load, 0.0);
    }

    #[test]
    fn test_refresh_averages_loads() {
        let mut servers = vec![Server::new(1, 100), Server::new(2, 100), Server::new(3, 100)];
        servers[0].admit(Task::new(1, 30).unwrap());
        servers[2].admit(Task::new(2, 15).unwrap());

        let mut stats = Statistics::default();
        stats.refresh(&servers);
        assert!((stats.average_load - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_average_load_empty_pool() {
        assert_eq!(average_load(&[]), 0.0);
    }
}
