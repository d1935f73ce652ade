use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;
use thiserror::Error;
use tracing::{debug, error};

use crate::worker::Task;

/// Core trait for all payloads carried inside a [`Task`].
pub trait Message: Serialize + DeserializeOwned + Debug + Send + Sync + Clone {
    fn message_type() -> &'static str
    where
        Self: Sized;

    fn message_id(&self) -> &str;
}

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Message type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },
}

impl Task {
    /// Wrap a typed message into a transport task.
    pub fn from_message<M: Message>(message: &M) -> Result<Self, MessageError> {
        debug!(
            message_type = M::message_type(),
            message_id = message.message_id(),
            "Wrapping message into task"
        );

        Ok(Self {
            id: message.message_id().to_string(),
            task_type: M::message_type().to_string(),
            payload: serde_json::to_value(message)?,
        })
    }

    /// Deserialize the payload back into a typed message.
    pub fn into_message<M: Message>(self) -> Result<M, MessageError> {
        if self.task_type != M::message_type() {
            error!(
                expected = M::message_type(),
                actual = %self.task_type,
                task_id = %self.id,
                "Task type mismatch"
            );
            return Err(MessageError::TypeMismatch {
                expected: M::message_type().to_string(),
                actual: self.task_type,
            });
        }

        Ok(serde_json::from_value(self.payload)?)
    }
}
