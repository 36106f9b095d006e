use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Runtime tunables.
///
/// `task_limit` and `tasks_per_iter` feed the backpressure formula of
/// [`crate::runtime::DequeEnvironment`]; `workers` sizes the pool.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Soft target for queue occupancy; generation slows as the queue
    /// approaches it.
    pub task_limit: usize,
    /// Number of pooled workers.
    pub workers: usize,
    /// Maximum tasks a worker may generate per queue visit.
    pub tasks_per_iter: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            task_limit: 100,
            workers: 4,
            tasks_per_iter: 5,
        }
    }
}

impl RuntimeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.task_limit == 0 {
            return Err(Error::config("task_limit must be positive"));
        }
        if self.workers == 0 {
            return Err(Error::config("workers must be positive"));
        }
        if self.tasks_per_iter == 0 {
            return Err(Error::config("tasks_per_iter must be positive"));
        }
        Ok(())
    }
}
