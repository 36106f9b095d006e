use std::fmt;
use std::sync::Arc;

use log::{debug, error, info};

use crate::errors::Result;
use crate::runtime::config::RuntimeConfig;
use crate::runtime::deque::QueueItem;
use crate::runtime::environment::DequeEnvironment;
use crate::runtime::provider::TaskProvider;
use crate::runtime::worker::TaskWorker;

/// Orchestrator for one pipeline execution: seeds the deque, spawns the
/// worker pool, waits for drain, and shuts the pool down.
///
/// Individual task failures never fail the runtime; they are logged and
/// contained at the worker boundary.
pub struct Runtime {
    environment: Arc<DequeEnvironment>,
    provider: Box<dyn TaskProvider>,
    config: RuntimeConfig,
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Runtime {
    pub fn new(provider: Box<dyn TaskProvider>, config: RuntimeConfig) -> Result<Runtime> {
        config.validate()?;

        Ok(Runtime {
            environment: Arc::new(DequeEnvironment::new(
                config.task_limit,
                config.tasks_per_iter,
            )),
            provider,
            config,
        })
    }

    /// Blocks until every seeded task, and every task transitively generated
    /// from one, reaches completion.
    pub async fn run(mut self) -> Result<()> {
        let seeds = self.provider.get_tasks();
        debug!("seeding queue with {} tasks", seeds.len());
        for task in seeds {
            self.environment.deque().push_back(QueueItem::Work(task)).await;
        }

        info!("spawning {} pipeline workers", self.config.workers);
        let mut handles = Vec::with_capacity(self.config.workers);
        for _ in 0..self.config.workers {
            let worker = TaskWorker::new(Arc::clone(&self.environment));
            handles.push(tokio::spawn(worker.run()));
        }

        self.environment.deque().join().await;
        info!("all tasks finished; queue drained");

        // One marker per worker: each reads exactly one and exits.
        for _ in 0..handles.len() {
            self.environment.deque().push_back(QueueItem::Shutdown).await;
        }

        for handle in handles {
            if let Err(err) = handle.await {
                error!("worker terminated abnormally: {err}");
            }
        }
        info!("workers stopped");

        Ok(())
    }
}
