use std::fmt;
use std::sync::Arc;

use log::error;

use crate::errors::Result;
use crate::pipeline::{Task, TaskBuilder};
use crate::runtime::{Runtime, RuntimeConfig, TaskProvider};
use crate::step::Step;

/// Collects compiled pipelines and doubles as the runtime's task provider.
///
/// Sequences are validated eagerly at `add_pipeline` time, so a bad pipeline
/// is rejected before anything runs.
#[derive(Default)]
pub struct PipelineBuilder {
    tasks: Vec<Task>,
}

impl PipelineBuilder {
    pub fn new() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn add_pipeline(&mut self, steps: &[Arc<dyn Step>]) -> Result<()> {
        let task = TaskBuilder::build_from(steps, true, false).inspect_err(|err| {
            error!("pipeline rejected: {err}");
        })?;

        self.tasks.push(task);
        Ok(())
    }
}

impl TaskProvider for PipelineBuilder {
    fn get_tasks(&mut self) -> Vec<Task> {
        std::mem::take(&mut self.tasks)
    }
}

/// Outer entry point: declare pipelines, then run them to completion.
///
/// ```no_run
/// # use std::sync::Arc;
/// # use strand::prelude::*;
/// # async fn demo(counter: Arc<dyn Step>, printer: Arc<dyn Step>) -> Result<()> {
/// Pipeliner::new(RuntimeConfig::default())
///     .add_pipeline(&[counter, printer])?
///     .run()
///     .await
/// # }
/// ```
pub struct Pipeliner {
    config: RuntimeConfig,
    builder: PipelineBuilder,
}

impl fmt::Debug for Pipeliner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeliner")
            .field("config", &self.config)
            .field("pipelines", &self.builder.tasks.len())
            .finish()
    }
}

impl Pipeliner {
    pub fn new(config: RuntimeConfig) -> Pipeliner {
        Pipeliner {
            config,
            builder: PipelineBuilder::new(),
        }
    }

    pub fn add_pipeline(mut self, steps: &[Arc<dyn Step>]) -> Result<Pipeliner> {
        self.builder.add_pipeline(steps)?;
        Ok(self)
    }

    /// Runs every declared pipeline to completion.
    pub async fn run(self) -> Result<()> {
        Runtime::new(Box::new(self.builder), self.config)?.run().await
    }
}
