mod pipeliner;

pub use pipeliner::{PipelineBuilder, Pipeliner};
