use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use mq::{MqConfig, TaskPublisher, init_mq};
use tracing::{Level, info, warn};

use starter_server::config::AppConfig;
use starter_server::database::init_db;
use starter_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load().context("Failed to load config")?;

    let db = init_db(&config.database)
        .await
        .context("Failed to initialize database")?;
    info!("Database ready");

    let mq = connect_mq(&config).await;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server.host / server.port")?;

    let state = AppState {
        db: db.clone(),
        config,
        mq,
    };
    let app = starter_server::build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped, closing database pool");
    db.close().await?;

    Ok(())
}

/// Connect to the job queue. Startup continues without it, and job
/// enqueueing reports "Queue not configured" until the next restart.
async fn connect_mq(config: &AppConfig) -> Option<Arc<dyn TaskPublisher>> {
    if !config.mq.enabled {
        info!("MQ disabled, example jobs cannot be enqueued");
        return None;
    }

    match init_mq(MqConfig::from(&config.mq)).await {
        Ok(queue) => {
            info!(queue_name = %config.mq.queue_name, "MQ ready");
            Some(Arc::new(queue))
        }
        Err(e) => {
            warn!(error = %e, "MQ unavailable, continuing without job queue");
            None
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
