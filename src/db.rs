use migration::Migrator;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;

use crate::error::AppResult;

const PRAGMAS: &[&str] = &["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL"];

pub async fn connect_and_migrate(
    database_url: &str,
    max_connections: u32,
) -> AppResult<DatabaseConnection> {
    let mut opts = ConnectOptions::new(database_url);
    opts.max_connections(max_connections).sqlx_logging(false);

    let db = Database::connect(opts).await?;

    for pragma in PRAGMAS {
        db.execute(Statement::from_string(db.get_database_backend(), pragma.to_string()))
            .await?;
    }

    Migrator::up(&db, None).await?;
    tracing::debug!("schema up to date");

    Ok(db)
}
