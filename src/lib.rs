//! strand: single-package entry point.
//! The runtime is split into local module trees under `src/`: step contracts,
//! pipeline compilation, and the queue-driven execution runtime.

pub mod prelude;

#[path = "api/lib.rs"]
pub mod api;
#[path = "errors/lib.rs"]
pub mod errors;
#[path = "pipeline/lib.rs"]
pub mod pipeline;
#[path = "runtime/lib.rs"]
pub mod runtime;
#[path = "step/lib.rs"]
pub mod step;
#[path = "utils/lib.rs"]
pub mod utils;
