use std::sync::Arc;

use crate::runtime::deque::TaskDeque;
use crate::utils::math::round_half_up;

/// Shared execution context of one runtime: the work deque plus the two
/// backpressure tunables.
pub struct DequeEnvironment {
    deque: Arc<TaskDeque>,
    task_limit: usize,
    tasks_per_iter: usize,
}

impl DequeEnvironment {
    /// `task_limit` is the soft occupancy target the queue size is measured
    /// against; `tasks_per_iter` caps how many continuations a worker may
    /// generate in one visit.
    pub fn new(task_limit: usize, tasks_per_iter: usize) -> DequeEnvironment {
        DequeEnvironment {
            deque: Arc::new(TaskDeque::new()),
            task_limit,
            tasks_per_iter,
        }
    }

    pub fn deque(&self) -> &TaskDeque {
        &self.deque
    }

    /// Per-visit continuation budget for a worker, derived from current
    /// queue occupancy.
    pub async fn generation_limit(&self) -> usize {
        let queue_size = self.deque.len().await;
        self.generation_limit_for(queue_size)
    }

    /// Shrinks linearly from `tasks_per_iter` at an empty queue down to the
    /// floor of 1 at (or beyond) `task_limit`. The floor guarantees forward
    /// progress: even a saturated queue still allows one step per visit.
    /// Only the generation rate is limited; pushes themselves never fail,
    /// so the queue may transiently exceed `task_limit`.
    pub fn generation_limit_for(&self, queue_size: usize) -> usize {
        let usage = queue_size as f64 / self.task_limit as f64;
        let raw = round_half_up(self.tasks_per_iter as f64 * (1.0 - usage));

        raw.max(1) as usize
    }
}
