pub mod logger;
pub mod math;
