//! The `DocumentStorage` trait: durable string storage keyed by name.
//!
//! This is the persistence seam under [`crate::store::ContentStore`]: a flat
//! key/value space where each value is one serialised document. Backends live
//! in their own crates (e.g. `folio-store-sqlite`); [`MemoryStorage`] is kept
//! here for tests and ephemeral runs.

use std::{collections::HashMap, convert::Infallible, future::Future, sync::Arc};

use parking_lot::Mutex;

/// Abstraction over a persistent key/value backend.
///
/// Writes replace the previous value wholesale; there is no merge.
pub trait DocumentStorage: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the value stored under `key`, or `None` if nothing was written.
  fn read<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  /// Store `value` under `key`, replacing any previous value.
  fn write<'a>(
    &'a self,
    key: &'a str,
    value: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

/// In-process storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
  entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
  pub fn new() -> Self { Self::default() }

  /// Seed a raw value, bypassing serialisation. Used to simulate corrupt or
  /// foreign data.
  pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
    self.entries.lock().insert(key.into(), value.into());
  }

  pub fn get_raw(&self, key: &str) -> Option<String> {
    self.entries.lock().get(key).cloned()
  }

  pub fn is_empty(&self) -> bool { self.entries.lock().is_empty() }
}

impl DocumentStorage for MemoryStorage {
  type Error = Infallible;

  async fn read(&self, key: &str) -> Result<Option<String>, Infallible> {
    Ok(self.get_raw(key))
  }

  async fn write(&self, key: &str, value: String) -> Result<(), Infallible> {
    self.entries.lock().insert(key.to_owned(), value);
    Ok(())
  }
}
