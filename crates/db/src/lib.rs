pub mod models;

use sqlx::SqlitePool;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DBServiceError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Shared handle to the SQLite pool. Migrations are embedded and applied
/// once at construction.
#[derive(Debug, Clone)]
pub struct DBService {
    pub pool: SqlitePool,
}

impl DBService {
    pub async fn new(database_url: &str) -> Result<Self, DBServiceError> {
        let pool = SqlitePool::connect(database_url).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::debug!("database ready at {database_url}");
        Ok(Self { pool })
    }
}
