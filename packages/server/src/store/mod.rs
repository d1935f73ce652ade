pub mod example;

pub use example::{ExampleFields, ExamplePatch, ExampleStore};
