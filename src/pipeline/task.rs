use std::fmt;
use std::sync::Arc;

use futures::StreamExt;
use log::{debug, error};
use uuid::Uuid;

use crate::errors::{Error, ErrorKind, Result};
use crate::pipeline::chain::ChainNode;
use crate::step::{Payload, PayloadStream};

/// One resumable execution cursor through a compiled chain.
///
/// A task owns its position in the chain, one in-flight payload, and a
/// lazily-started cursor over the current step's outputs. It is exclusively
/// owned by the worker executing it; nothing else may touch it concurrently.
///
/// Lifecycle: fresh → running → done. `done` is terminal; calling `step()`
/// on a done task is a caller logic error.
pub struct Task {
    id: Uuid,
    node: Arc<ChainNode>,
    payload: Option<Payload>,
    cursor: Option<PayloadStream>,
    done: bool,
    strict_types: bool,
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.id)
            .field("step", &self.node.step.name())
            .field("done", &self.done)
            .field("strict_types", &self.strict_types)
            .finish()
    }
}

impl Task {
    pub(crate) fn new(node: Arc<ChainNode>, payload: Payload, strict_types: bool) -> Task {
        Task {
            id: Uuid::new_v4(),
            node,
            payload: Some(payload),
            cursor: None,
            done: false,
            strict_types,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Advances the task by exactly one element of the current step's output.
    ///
    /// Returns:
    /// - `Ok(Some(task))` — a continuation positioned at the next node,
    ///   carrying the produced value; the receiver re-enqueues it.
    /// - `Ok(None)` — normal completion: the output sequence is exhausted or
    ///   the terminal node produced the pipeline's final value. A control
    ///   signal, not a failure.
    /// - `Err(_)` — the task failed (step body error or strict type
    ///   violation) and is marked done; it must be discarded, never retried.
    pub async fn step(&mut self) -> Result<Option<Task>> {
        if self.done {
            return Err(Error::task("step() called on a completed task"));
        }

        if self.cursor.is_none() {
            self.start_cursor().await?;
        }

        let Some(cursor) = self.cursor.as_mut() else {
            return Err(Error::task("task cursor failed to initialize"));
        };

        let produced = cursor.next().await;
        let step_name = self.node.step.name();

        match produced {
            None => {
                // Output sequence exhausted; this lineage ends here.
                self.done = true;
                debug!("task {}: step {} finished", self.id, step_name);
                Ok(None)
            }
            Some(Err(err)) => {
                self.done = true;
                error!("task {}: step {} failed: {err}", self.id, step_name);
                Err(Error::with_message(
                    ErrorKind::Task,
                    format!("step {step_name} failed"),
                    Some(err),
                ))
            }
            Some(Ok(value)) => {
                if self.strict_types {
                    let expected = self.node.step.output_type();
                    if !expected.matches_value(&value) {
                        self.done = true;
                        let message = format!(
                            "step {step_name}: produced value does not match declared output type {expected}"
                        );
                        error!("task {}: {message}", self.id);
                        return Err(Error::type_check(message));
                    }
                }

                match self.node.next.clone() {
                    None => {
                        // Terminal node: the value is the pipeline's final
                        // output and is not forwarded.
                        self.done = true;
                        debug!("task {}: step {} completed the chain", self.id, step_name);
                        Ok(None)
                    }
                    Some(next) => Ok(Some(Task::new(next, value, self.strict_types))),
                }
            }
        }
    }

    /// Invokes `start()` on the current step and installs the output cursor.
    async fn start_cursor(&mut self) -> Result<()> {
        let step_name = self.node.step.name();

        let Some(payload) = self.payload.take() else {
            return Err(Error::task("task payload already consumed"));
        };

        if self.strict_types {
            let expected = self.node.step.input_type();
            if !expected.matches_value(&payload) {
                self.done = true;
                let message = format!(
                    "step {step_name}: payload does not match declared input type {expected}"
                );
                error!("task {}: {message}", self.id);
                return Err(Error::type_check(message));
            }
        }

        debug!("task {}: invoking start() on step {}", self.id, step_name);

        match self.node.step.start(payload).await {
            Ok(output) => {
                self.cursor = Some(output.into_stream());
                Ok(())
            }
            Err(err) => {
                self.done = true;
                error!("task {}: step {} start() failed: {err}", self.id, step_name);
                Err(Error::with_message(
                    ErrorKind::Task,
                    format!("step {step_name} failed"),
                    Some(err),
                ))
            }
        }
    }
}
