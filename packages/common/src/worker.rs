use serde::{Deserialize, Serialize};

/// Task published to the queue for an out-of-process consumer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub task_type: String,
    pub payload: serde_json::Value,
}
