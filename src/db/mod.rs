//! Database module: models, schema and connection helpers.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring catalog rows
//! - `schema.rs`: SQL DDL + seed rows applied on every start
//! - `rows.rs`: dynamic row decoding for the raw-query endpoint
//!
//! Connections are scoped per request: each handler opens a fresh
//! `SqliteConnection` and drops it on return, success or error.

pub mod models;
pub mod rows;
pub mod schema;

pub use models::Record;
pub use schema::SQLITE_INIT;

use crate::error::CatalogError;
use sqlx::ConnectOptions;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteConnection, SqliteJournalMode, SqliteSynchronous,
};
use std::{str::FromStr, time::Duration};
use tracing::info;

/// Connect options shared by startup init and per-request connections.
pub fn connect_options(database_url: &str) -> Result<SqliteConnectOptions, CatalogError> {
    let opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5))
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal);
    Ok(opts)
}

/// Opens a fresh connection; the caller drops it when done.
pub async fn connect(opts: &SqliteConnectOptions) -> Result<SqliteConnection, CatalogError> {
    Ok(opts.connect().await?)
}

/// Drops, recreates and seeds the catalog table. Run once at process start.
pub async fn init_db(database_url: &str) -> Result<(), CatalogError> {
    let opts = connect_options(database_url)?;
    let mut conn = connect(&opts).await?;
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(&mut conn).await?;
    }
    info!("catalog table rebuilt and seeded");
    Ok(())
}
