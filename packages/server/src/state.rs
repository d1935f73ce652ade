use std::sync::Arc;

use mq::TaskPublisher;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    /// `None` when the queue is disabled or was unreachable at startup.
    pub mq: Option<Arc<dyn TaskPublisher>>,
}
