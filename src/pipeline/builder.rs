use std::sync::Arc;

use crate::errors::{Error, ErrorKind, Result};
use crate::pipeline::chain::build_chain;
use crate::pipeline::task::Task;
use crate::pipeline::validation::StepSequenceValidator;
use crate::step::{absent, Step};

/// Compiles a step sequence into the initial task of a fresh chain.
pub struct TaskBuilder;

impl TaskBuilder {
    /// Validates (optionally), builds the chain, and wraps the head node
    /// plus the absent payload into a fresh task.
    ///
    /// Any validator failure aborts construction entirely; no partial chain
    /// is ever returned. `strict_runtime_types` is inherited by every
    /// continuation task the returned task transitively produces.
    pub fn build_from(
        steps: &[Arc<dyn Step>],
        validate_types: bool,
        strict_runtime_types: bool,
    ) -> Result<Task> {
        if validate_types {
            StepSequenceValidator::validate(steps).map_err(|err| {
                Error::with_message(
                    ErrorKind::Build,
                    format!("step sequence rejected: {err}"),
                    Some(err),
                )
            })?;
        }

        let head = build_chain(steps)?;
        Ok(Task::new(head, absent(), strict_runtime_types))
    }
}
