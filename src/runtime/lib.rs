mod config;
mod core;
mod deque;
mod environment;
mod provider;
mod worker;

pub use self::core::Runtime;
pub use config::RuntimeConfig;
pub use deque::{QueueItem, TaskDeque};
pub use environment::DequeEnvironment;
pub use provider::TaskProvider;
pub use worker::TaskWorker;
