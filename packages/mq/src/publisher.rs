use async_trait::async_trait;
use common::Task;
use common::mq::Message;
use tracing::debug;

use crate::config::PublishConfig;
use crate::error::MqError;
use crate::models::MqQueue;

/// Publishing side of the job queue.
///
/// The server holds an `Arc<dyn TaskPublisher>`, so handlers never see the
/// concrete broker type.
#[async_trait]
pub trait TaskPublisher: Send + Sync {
    /// Publish a task to `queue_name`, returning the broker-assigned message ID.
    async fn publish_task(&self, queue_name: &str, task: &Task) -> Result<String, MqError>;
}

#[async_trait]
impl TaskPublisher for MqQueue {
    async fn publish_task(&self, queue_name: &str, task: &Task) -> Result<String, MqError> {
        let options: Option<PublishConfig> = None;
        let message = self.publish(queue_name, None, task, options).await?;
        let message_id = message.task_id.to_string();

        debug!(
            queue = queue_name,
            task_id = %task.id,
            message_id = %message_id,
            "Task published"
        );

        Ok(message_id)
    }
}

/// Wrap a typed message into a [`Task`] and publish it.
pub async fn publish_message<M: Message>(
    publisher: &dyn TaskPublisher,
    queue_name: &str,
    message: &M,
) -> Result<String, MqError> {
    let task = Task::from_message(message)?;
    publisher.publish_task(queue_name, &task).await
}
