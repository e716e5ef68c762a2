mod config;
mod db;
mod emissions;
mod error;
mod models;
mod openapi;
mod routes;
mod server;
mod store;

use std::sync::Arc;

use config::AppConfig;
use store::{postgres::PgTripRepository, TripStore};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load config
    let config = AppConfig::load()?;

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter())
        .init();

    info!("Starting Trip Emissions API ({})...", config.app_env);

    // Init DB
    let pool = db::init_pool(&config).await?;
    info!("Connected to database");

    db::run_migrations(&pool).await?;
    info!("Schema up to date");

    let store = TripStore::new(Arc::new(PgTripRepository::new(pool)));

    server::serve(&config, store).await
}
