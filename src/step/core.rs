use async_trait::async_trait;

use crate::errors::Result;
use crate::step::types::{Payload, StepOutput, StepType};

/// One declared processing stage of a pipeline.
///
/// A step carries explicit, queryable input/output type tags and a single
/// entry point, `start`. The runtime only ever sees this erased interface;
/// typed implementations go through [`crate::step::FnStep`] or a hand-written
/// impl.
///
/// Contract:
/// - `start` is invoked at most once per task visit of the owning chain node.
/// - Returning `StepOutput::Value` passes one result downstream; returning
///   `StepOutput::Stream` restarts the remaining chain once per yielded
///   element, each element becoming the payload of an autonomous
///   continuation task.
/// - Steps sharing external resources across workers must guard them
///   themselves; the runtime gives no cross-task exclusion beyond the queue.
#[async_trait]
pub trait Step: Send + Sync {
    /// Human-readable step name used in logs and error messages.
    fn name(&self) -> &str;

    /// Declared input type tag.
    fn input_type(&self) -> StepType;

    /// Declared output type tag.
    fn output_type(&self) -> StepType;

    /// Runs the step body against one input payload.
    async fn start(&self, input: Payload) -> Result<StepOutput>;
}
