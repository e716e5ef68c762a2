use anyhow::Result;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, Pool, Postgres};

use crate::config::AppConfig;
use crate::error::StoreError;

pub mod queries;

pub type DbPool = Pool<Postgres>;

pub async fn init_pool(config: &AppConfig) -> Result<DbPool> {
    let mut options: PgConnectOptions = config.database_url.parse()?;
    if config.is_production() {
        options = options.disable_statement_logging();
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect_with(options)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &DbPool) -> Result<(), StoreError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
