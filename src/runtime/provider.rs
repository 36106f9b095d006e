use crate::pipeline::Task;

/// External source of seed tasks, consumed exactly once at runtime start.
pub trait TaskProvider: Send {
    fn get_tasks(&mut self) -> Vec<Task>;
}
