use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub db_max_connections: u32,
    pub seed_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "5000".to_string()).parse().context("PORT")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://movies.db?mode=rwc".to_string());

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .context("DB_MAX_CONNECTIONS")?;

        let seed_path = std::env::var("SEED_PATH").ok().filter(|s| !s.is_empty()).map(PathBuf::from);

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            db_max_connections,
            seed_path,
        })
    }
}
