use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use common::Task;
use mq::{MqError, TaskPublisher};
use reqwest::Client;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tempfile::TempDir;

use starter_server::config::{AppConfig, CorsConfig, DatabaseConfig, MqAppConfig, ServerConfig};
use starter_server::state::AppState;

pub mod routes {
    pub const EXAMPLES: &str = "/api/examples";
    pub const EXAMPLE_JOB: &str = "/api/example-job";
    pub const HEALTH: &str = "/api/health";

    pub fn example(id: &str) -> String {
        format!("/api/examples/{id}")
    }

    pub fn examples_page(page: u64, limit: u64) -> String {
        format!("/api/examples?page={page}&limit={limit}")
    }
}

/// Publisher that records every task and hands out sequential message IDs.
#[derive(Default)]
pub struct RecordingPublisher {
    pub published: Mutex<Vec<(String, Task)>>,
}

#[async_trait]
impl TaskPublisher for RecordingPublisher {
    async fn publish_task(&self, queue_name: &str, task: &Task) -> Result<String, MqError> {
        let mut published = self.published.lock().unwrap();
        published.push((queue_name.to_string(), task.clone()));
        Ok(format!("msg-{}", published.len()))
    }
}

/// Publisher whose broker is always down.
pub struct FailingPublisher;

#[async_trait]
impl TaskPublisher for FailingPublisher {
    async fn publish_task(&self, _queue_name: &str, _task: &Task) -> Result<String, MqError> {
        Err(MqError::Connection("Connection refused (os error 111)".into()))
    }
}

/// A running test server backed by its own SQLite database file.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
    _db_dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestApp {
    /// Spawn a server with no job queue configured.
    pub async fn spawn() -> Self {
        Self::spawn_with_mq(None).await
    }

    pub async fn spawn_with_mq(mq: Option<Arc<dyn TaskPublisher>>) -> Self {
        let db_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_url = format!(
            "sqlite://{}?mode=rwc",
            db_dir.path().join("test.db").display()
        );

        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            database: DatabaseConfig {
                url: db_url,
                max_connections: 1,
                min_connections: 1,
            },
            mq: MqAppConfig {
                enabled: mq.is_some(),
                ..Default::default()
            },
        };

        let db = starter_server::database::init_db(&app_config.database)
            .await
            .expect("Failed to initialize test database");

        let state = AppState {
            db: db.clone(),
            config: app_config,
            mq,
        };

        let app = starter_server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            db,
            _db_dir: db_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn post(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_raw(&self, path: &str, body: &'static str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT request");

        TestResponse::from_response(res).await
    }

    pub async fn patch(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .patch(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send PATCH request");

        TestResponse::from_response(res).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send DELETE request");

        TestResponse::from_response(res).await
    }

    /// Create an example via the API and return the response body.
    pub async fn create_example_with(&self, body: Value) -> Value {
        let res = self.post(routes::EXAMPLES, &body).await;
        assert_eq!(res.status, 201, "create_example failed: {}", res.text);
        res.body
    }

    /// Create an example with the given title and return its `id`.
    pub async fn create_example(&self, title: &str) -> String {
        let body = self
            .create_example_with(serde_json::json!({
                "title": title,
                "description": "A test example for integration testing",
                "content": "This is the content of the test example",
                "metadata": { "testFlag": true },
            }))
            .await;
        body["id"]
            .as_str()
            .expect("create response should contain a string 'id'")
            .to_string()
    }
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }
}
