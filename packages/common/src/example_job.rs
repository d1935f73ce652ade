use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::mq::Message;

/// A processing job for a single example, sent to the job queue.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExampleJob {
    /// Job identifier (UUID)
    pub job_id: String,
    /// ID of the example to process
    pub example_id: String,
}

impl ExampleJob {
    /// Create a new example job with a generated UUID.
    pub fn new(example_id: impl Into<String>) -> Self {
        Self {
            job_id: Uuid::new_v4().to_string(),
            example_id: example_id.into(),
        }
    }
}

impl Message for ExampleJob {
    fn message_type() -> &'static str {
        "example_job"
    }

    fn message_id(&self) -> &str {
        &self.job_id
    }
}
