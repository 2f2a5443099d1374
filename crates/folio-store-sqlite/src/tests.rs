//! Integration tests for `SqliteStorage`, in memory and on disk.

use folio_core::{
  defaults::{DEFAULT_STORAGE_KEY, default_document},
  document::WorkCategory,
  storage::DocumentStorage,
  store::ContentStore,
};

use crate::SqliteStorage;

async fn storage() -> SqliteStorage {
  SqliteStorage::open_in_memory()
    .await
    .expect("in-memory storage")
}

// ─── Raw key/value ───────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_key_reads_none() {
  let s = storage().await;
  assert_eq!(s.read("nothing-here").await.unwrap(), None);
}

#[tokio::test]
async fn write_then_read() {
  let s = storage().await;
  s.write("k", "{\"a\":1}".to_owned()).await.unwrap();
  assert_eq!(s.read("k").await.unwrap().as_deref(), Some("{\"a\":1}"));
}

#[tokio::test]
async fn write_replaces_previous_value() {
  let s = storage().await;
  s.write("k", "first".to_owned()).await.unwrap();
  s.write("k", "second".to_owned()).await.unwrap();
  assert_eq!(s.read("k").await.unwrap().as_deref(), Some("second"));
  assert_eq!(s.keys().await.unwrap(), ["k"]);
}

#[tokio::test]
async fn keys_are_sorted_and_timestamped() {
  let s = storage().await;
  s.write("b", "2".to_owned()).await.unwrap();
  s.write("a", "1".to_owned()).await.unwrap();
  assert_eq!(s.keys().await.unwrap(), ["a", "b"]);
  assert!(s.updated_at("a").await.unwrap().is_some());
  assert!(s.updated_at("zzz").await.unwrap().is_none());
}

// ─── Through the content store ───────────────────────────────────────────────

#[tokio::test]
async fn document_survives_reopening_the_file() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("folio.db");

  let mut doc = default_document();
  doc.branding.name = "Persisted Studio".into();
  doc.projects.retain(|p| p.category != WorkCategory::Photography);

  {
    let storage = SqliteStorage::open(&path).await.unwrap();
    let store = ContentStore::with_builtin_content(storage, DEFAULT_STORAGE_KEY);
    store.save(doc.clone()).await.unwrap();
  }

  let storage = SqliteStorage::open(&path).await.unwrap();
  let store = ContentStore::with_builtin_content(storage, DEFAULT_STORAGE_KEY);
  let loaded = store.load().await;
  assert_eq!(*loaded, doc);
}

#[tokio::test]
async fn corrupt_row_falls_back_to_default() {
  let s = storage().await;
  s.write(DEFAULT_STORAGE_KEY, "[1, 2, 3]".to_owned()).await.unwrap();
  let store = ContentStore::with_builtin_content(s, DEFAULT_STORAGE_KEY);
  assert_eq!(*store.load().await, default_document());
}
