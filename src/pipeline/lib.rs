mod builder;
mod chain;
mod task;
mod validation;

pub use builder::TaskBuilder;
pub use chain::{build_chain, ChainNode};
pub use task::Task;
pub use validation::StepSequenceValidator;

#[cfg(test)]
mod tests;
