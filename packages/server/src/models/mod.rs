pub mod example;
pub mod shared;
