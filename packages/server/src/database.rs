use std::time::Duration;

use sea_orm::sea_query::{Index, PostgresQueryBuilder, SqliteQueryBuilder};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr};
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::entity::example;

pub async fn init_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.to_owned());

    // Set connection pool options
    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(true);

    let db = Database::connect(opt).await?;
    db.get_schema_builder()
        .register(example::Entity)
        .sync(&db)
        .await?;

    ensure_indexes(&db).await;

    Ok(db)
}

/// Ensure required database indexes exist.
///
/// Schema-sync only creates indexes declared on the entity, so the listing
/// index is created here. Failure is logged and startup continues.
pub async fn ensure_indexes(db: &DatabaseConnection) {
    // SELECT ... FROM example ORDER BY created_at DESC LIMIT ? OFFSET ?
    let index = Index::create()
        .if_not_exists()
        .name("idx_example_created_at")
        .table(example::Entity)
        .col(example::Column::CreatedAt)
        .to_owned();

    let stmt = match db.get_database_backend() {
        DbBackend::Sqlite => index.to_string(SqliteQueryBuilder),
        _ => index.to_string(PostgresQueryBuilder),
    };

    match db.execute_unprepared(&stmt).await {
        Ok(_) => {
            info!("Ensured index idx_example_created_at exists");
        }
        Err(e) => {
            warn!("Failed to create index idx_example_created_at: {}", e);
        }
    }
}
