mod core;
mod typed;
mod types;

pub use self::core::Step;
pub use typed::{Emit, FnStep};
pub use types::{absent, payload, Payload, PayloadStream, StepOutput, StepType};
