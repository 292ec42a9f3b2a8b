//! Opening the region store.
//!
//! Every handle runs in WAL mode with foreign keys enforced, so dropping a
//! region cascades to its entries.

use std::path::Path;

use tokio_rusqlite::Connection;

use super::migrations;
use crate::Error;

const PRAGMAS: &str = "PRAGMA journal_mode=WAL;
     PRAGMA synchronous=NORMAL;
     PRAGMA temp_store=MEMORY;
     PRAGMA foreign_keys=ON;";

/// SQLite-backed region store.
///
/// Statements run on tokio-rusqlite's worker thread, so every call is a
/// suspension point for the caller. Clones share one connection.
#[derive(Clone, Debug)]
pub struct CacheDb {
    pub(crate) conn: Connection,
}

impl CacheDb {
    /// Open (or create) the store file, creating missing parent
    /// directories, and bring the schema up to date.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .map_err(|e| Error::MigrationFailed(format!("cannot create {}: {e}", dir.display())))?;
        }

        let conn = Connection::open(path).await.map_err(|e| Error::Database(e.into()))?;
        Self::prepare(conn).await
    }

    pub async fn open_in_memory() -> Result<Self, Error> {
        let conn = Connection::open_in_memory().await.map_err(|e| Error::Database(e.into()))?;
        Self::prepare(conn).await
    }

    async fn prepare(conn: Connection) -> Result<Self, Error> {
        conn.call(|c| c.execute_batch(PRAGMAS)).await.map_err(Error::Database)?;
        migrations::run(&conn).await?;
        Ok(Self { conn })
    }
}
