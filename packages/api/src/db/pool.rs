//! Database connection pool, initialised once per process.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::OnceCell;

use crate::settings::Settings;

static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// Get or initialize the database connection pool from [`Settings`].
pub async fn get_pool() -> Result<&'static PgPool, sqlx::Error> {
    POOL.get_or_try_init(|| async {
        let database = &Settings::current().database;
        tracing::info!("Connecting to {}:{}/{}", database.host, database.port, database.name);

        PgPoolOptions::new()
            .max_connections(database.connections)
            .connect(&database.url())
            .await
    })
    .await
}
