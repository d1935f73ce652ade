pub mod config;
pub mod example_job;
pub mod mq;
pub mod worker;

pub use example_job::ExampleJob;
pub use worker::Task;
