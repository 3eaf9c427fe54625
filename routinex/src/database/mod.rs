//! Database module
//!
//! This module provides all database functionality including:
//! - Schema and migrations
//! - Model definitions
//! - Repository layer for queries and transactional mutations
//!
//! The store is a single SQLite connection shared by every service.
//! SQLite serializes statements on it, so callers need no extra locking.

pub mod models;
pub mod repository;
pub mod schema;

pub use models::*;
pub use repository::Repository;
pub use schema::initialize_database;

use crate::config;
use crate::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Build connection options shared by migration and application connections.
fn connect_options(db_path: &Path) -> std::result::Result<SqliteConnectOptions, sqlx::Error> {
    SqliteConnectOptions::from_str(&format!("sqlite://{}?mode=rwc", db_path.display())).map(
        |opts| {
            // WAL lets readers run beside a writer; the busy timeout covers
            // a second process holding the write lock
            opts.create_if_missing(true)
                .busy_timeout(Duration::from_secs(config::BUSY_TIMEOUT_SECS))
                .journal_mode(SqliteJournalMode::Wal)
                .foreign_keys(true)
        },
    )
}

/// Pool options for the one long-lived store handle.
fn single_connection() -> SqlitePoolOptions {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
}

/// Open the store at `db_path`, creating and migrating it if needed.
///
/// Migrations run on a dedicated connection that is closed before the
/// application handle is opened, so the handle never caches a schema
/// from before an ALTER TABLE ADD COLUMN.
pub async fn create_pool(db_path: &Path) -> Result<SqlitePool> {
    tracing::info!("Opening database at: {:?}", db_path);

    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Phase 1: migrate on a dedicated connection, then close it
    let migration_pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(connect_options(db_path)?)
        .await?;

    initialize_database(&migration_pool).await?;
    migration_pool.close().await;

    // Phase 2: the long-lived handle opens after every migration committed
    let pool = single_connection()
        .connect_with(connect_options(db_path)?)
        .await?;

    tracing::info!("Database handle ready");

    Ok(pool)
}

/// Open a migrated in-memory store.
///
/// The memory database lives exactly as long as its single connection,
/// which the pool keeps open until it is dropped.
pub async fn create_memory_pool() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = single_connection().connect_with(options).await?;

    initialize_database(&pool).await?;

    Ok(pool)
}
