//! [`SqliteStorage`], the SQLite implementation of [`DocumentStorage`].

use std::path::Path;

use chrono::{DateTime, Utc};
use folio_core::storage::DocumentStorage;
use rusqlite::OptionalExtension as _;
use tracing::debug;

use crate::{Result, schema::SCHEMA};

/// Document storage backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStorage {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStorage {
  /// Open (or create) storage at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let storage = Self { conn };
    storage.init_schema().await?;
    Ok(storage)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let storage = Self { conn };
    storage.init_schema().await?;
    Ok(storage)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Every key that currently holds a document, sorted.
  pub async fn keys(&self) -> Result<Vec<String>> {
    let keys = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT storage_key FROM documents ORDER BY storage_key")?;
        let rows = stmt
          .query_map([], |r| r.get::<_, String>(0))?
          .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
      })
      .await?;
    Ok(keys)
  }

  /// When the document under `key` was last written.
  pub async fn updated_at(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
    let key = key.to_owned();
    let raw: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT updated_at FROM documents WHERE storage_key = ?1",
              rusqlite::params![key],
              |r| r.get(0),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(
      raw
        .map(|s| DateTime::parse_from_rfc3339(&s).map(|dt| dt.with_timezone(&Utc)))
        .transpose()?,
    )
  }
}

// ─── DocumentStorage impl ────────────────────────────────────────────────────

impl DocumentStorage for SqliteStorage {
  type Error = crate::Error;

  async fn read(&self, key: &str) -> Result<Option<String>> {
    let key = key.to_owned();
    let value: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT value FROM documents WHERE storage_key = ?1",
              rusqlite::params![key],
              |r| r.get(0),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(value)
  }

  async fn write(&self, key: &str, value: String) -> Result<()> {
    let key_owned = key.to_owned();
    let updated_at = Utc::now().to_rfc3339();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO documents (storage_key, value, updated_at)
           VALUES (?1, ?2, ?3)
           ON CONFLICT(storage_key) DO UPDATE SET
             value      = excluded.value,
             updated_at = excluded.updated_at",
          rusqlite::params![key_owned, value, updated_at],
        )?;
        Ok(())
      })
      .await?;
    debug!(key, "document written");
    Ok(())
  }
}
