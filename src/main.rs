mod config;
mod db;
mod entities;
mod error;
mod models;
mod routes;
mod seed;
mod store;


use std::sync::Arc;

use crate::{config::Config, store::Store};

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,moviedb=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let db = db::connect_and_migrate(&config.database_url, config.db_max_connections).await?;
    let store = Store::new(db);

    if let Some(path) = &config.seed_path {
        seed::load_file(&store, path).await?;
    }

    let app = routes::router(Arc::new(AppState { store }));

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
