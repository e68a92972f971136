//! PostgreSQL persistence for the tool directory.
//!
//! Models and zero-sized repositories follow one table each. The
//! [`directory::Directory`] service sits on top and owns the read paths that
//! hydrate relations and degrade to empty results on backend errors.

use sqlx::postgres::PgPoolOptions;

pub mod directory;
pub mod models;
pub mod relations;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
