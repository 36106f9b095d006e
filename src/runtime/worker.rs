use std::sync::Arc;

use log::{debug, error};
use metrics::counter;

use crate::runtime::deque::QueueItem;
use crate::runtime::environment::DequeEnvironment;

/// One worker loop bound to a shared deque environment.
///
/// A worker exclusively owns each task for the duration of one bounded
/// burst of `step()` calls; task failures are contained here and never
/// propagate to the loop or to other tasks.
pub struct TaskWorker {
    environment: Arc<DequeEnvironment>,
}

impl TaskWorker {
    pub fn new(environment: Arc<DequeEnvironment>) -> TaskWorker {
        TaskWorker { environment }
    }

    /// Runs until a shutdown marker is popped.
    pub async fn run(self) {
        debug!("worker started");

        loop {
            let mut task = match self.environment.deque().pop_front().await {
                QueueItem::Shutdown => {
                    debug!("worker stopped");
                    break;
                }
                QueueItem::Work(task) => task,
            };

            let limit = self.environment.generation_limit().await;
            debug!(
                "worker picked up task {} (generation limit {limit})",
                task.id()
            );

            for _ in 0..limit {
                match task.step().await {
                    Ok(Some(continuation)) => {
                        self.environment
                            .deque()
                            .push_back(QueueItem::Work(continuation))
                            .await;
                    }
                    Ok(None) => {
                        counter!("strand_tasks_completed").increment(1);
                        debug!("worker finished task {}", task.id());
                        break;
                    }
                    Err(err) => {
                        counter!("strand_tasks_failed").increment(1);
                        error!("task {} failed and was dropped: {err}", task.id());
                        break;
                    }
                }
            }

            if !task.is_done() {
                // Pending sequence elements remain; back to the tail.
                self.environment
                    .deque()
                    .push_back(QueueItem::Work(task))
                    .await;
            }

            self.environment.deque().task_done();
        }
    }
}
