pub mod example;
pub mod example_job;
pub mod health;
