// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection lifecycle: open, PRAGMA setup, migrations, close.
//!
//! All reads and writes go through the one `tokio_rusqlite::Connection`
//! held here. Do not open a second connection for writes.

use std::path::Path;
use std::time::Duration;

use rusqlite::functions::FunctionFlags;

use storefront_core::StorefrontError;
use tracing::{debug, info};

/// Handle to the storefront database.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (creating if needed) the database at `path`, configure it and
    /// run pending migrations.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, StorefrontError> {
        match Path::new(path).parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                std::fs::create_dir_all(parent).map_err(|e| StorefrontError::Storage {
                    source: Box::new(e),
                })?;
            }
            _ => {}
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(tokio_rusqlite::Error::Error)
            .map_err(map_tr_err)?;

        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            if wal_mode {
                let mode: String = conn.pragma_update_and_check(
                    None,
                    "journal_mode",
                    "WAL",
                    |row| row.get(0),
                )?;
                debug!(journal_mode = %mode, "journal mode set");
            }
            conn.pragma_update(None, "foreign_keys", "ON")?;
            conn.pragma_update(None, "synchronous", "NORMAL")?;
            conn.busy_timeout(Duration::from_secs(5))?;
            register_functions(conn)?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        let applied = conn
            .call(|conn| crate::migrations::run_migrations(conn))
            .await
            .map_err(|e| StorefrontError::Storage {
                source: e.to_string().into(),
            })?;
        if applied > 0 {
            info!(applied, path, "database migrations applied");
        }

        Ok(Self { conn })
    }

    /// The underlying async connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Fold the WAL back into the main database file.
    pub async fn checkpoint(&self) -> Result<(), StorefrontError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    /// Checkpoint the WAL and close the connection.
    pub async fn close(self) -> Result<(), StorefrontError> {
        self.checkpoint().await?;
        self.conn.close().await.map_err(|e| StorefrontError::Storage {
            source: e.to_string().into(),
        })
    }
}

/// SQL name of the Unicode lowercase function. SQLite's own `LOWER` and
/// `LIKE` only fold ASCII.
pub(crate) const FOLD_CASE: &str = "fold_case";

/// Register scalar functions the queries rely on.
fn register_functions(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        FOLD_CASE,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|t| t.to_lowercase()))
        },
    )
}

/// Convert a tokio-rusqlite error into [`StorefrontError::Storage`].
pub fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> StorefrontError {
    StorefrontError::Storage {
        source: Box::new(e),
    }
}

/// Wrap a row-decoding failure so it can travel through rusqlite's error type.
pub(crate) fn conversion_err(
    column: usize,
    e: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_file_and_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("shop.db");
        let db = Database::open(path.to_str().unwrap(), true).await.unwrap();
        assert!(path.exists());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn migrations_create_tables_and_enable_foreign_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shop.db");
        let db = Database::open(path.to_str().unwrap(), true).await.unwrap();

        let (tables, fk): (Vec<String>, i64) = db
            .connection()
            .call(|conn| -> Result<_, rusqlite::Error> {
                let mut stmt = conn.prepare(
                    "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
                )?;
                let tables = stmt
                    .query_map([], |row| row.get(0))?
                    .collect::<Result<Vec<String>, _>>()?;
                let fk = conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0))?;
                Ok((tables, fk))
            })
            .await
            .unwrap();

        for table in ["archived_sales", "products", "sales"] {
            assert!(tables.iter().any(|t| t == table), "missing table {table}");
        }
        assert_eq!(fk, 1);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn reopening_applies_no_migrations_twice() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shop.db");
        let path = path.to_str().unwrap();

        Database::open(path, true).await.unwrap().close().await.unwrap();
        let db = Database::open(path, true).await.unwrap();
        let count: i64 = db
            .connection()
            .call(|conn| -> Result<_, rusqlite::Error> {
                conn.query_row("SELECT COUNT(*) FROM refinery_schema_history", [], |row| {
                    row.get(0)
                })
            })
            .await
            .unwrap();
        assert_eq!(count, 2);
        db.close().await.unwrap();
    }
}
