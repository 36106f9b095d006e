// Common Traits and Structs
pub use crate::step::{absent, payload, Emit, FnStep, Payload, PayloadStream, Step, StepOutput, StepType};

pub use crate::pipeline::{build_chain, ChainNode, StepSequenceValidator, Task, TaskBuilder};

pub use crate::runtime::{
    DequeEnvironment, QueueItem, Runtime, RuntimeConfig, TaskDeque, TaskProvider, TaskWorker,
};

pub use crate::api::{PipelineBuilder, Pipeliner};

// Errors
pub use crate::errors::{BoxError, Error, ErrorKind, Result, ValidationError};

// Utils
pub use crate::utils::logger::init_logging;
pub use crate::utils::math::round_half_up;
