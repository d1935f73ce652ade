pub mod config;
pub mod error;
pub mod models;
pub mod publisher;

pub use error::MqError;
pub use models::{MqConfig, MqQueue, init_mq};
pub use publisher::{TaskPublisher, publish_message};
