//! [`ContentStore`], the single owner of the active site document(s).
//!
//! The store keeps one document per configured language in memory and
//! persists each under its own storage key. Presentation reads through
//! [`ContentStore::active`]; the only writers are [`ContentStore::save`]
//! (durable) and [`ContentStore::publish_with`] (in-memory enrichment). Writes are
//! last-write-wins; nothing is merged.

use std::{collections::BTreeMap, sync::Arc};

use parking_lot::RwLock;
use tracing::{debug, error, warn};

use crate::{
  Error, Result,
  defaults::builtin_documents,
  document::{CURRENT_SCHEMA_VERSION, SiteDocument},
  language::Language,
  storage::DocumentStorage,
};

// ─── Store ───────────────────────────────────────────────────────────────────

struct StoreState {
  active:    Language,
  documents: BTreeMap<Language, Arc<SiteDocument>>,
}

/// Owns the site documents and their persisted copies.
pub struct ContentStore<S> {
  storage:  S,
  key:      String,
  primary:  Language,
  defaults: BTreeMap<Language, SiteDocument>,
  state:    RwLock<StoreState>,
}

impl<S: DocumentStorage> ContentStore<S> {
  /// Build a store over `storage`. `defaults` supplies the fallback document
  /// for every supported language and must contain `primary`.
  ///
  /// In-memory documents start out as the defaults; call [`Self::load`] or
  /// [`Self::load_all`] to pick up persisted content.
  pub fn new(
    storage: S,
    key: impl Into<String>,
    primary: Language,
    defaults: BTreeMap<Language, SiteDocument>,
  ) -> Result<Self> {
    if !defaults.contains_key(&primary) {
      return Err(Error::UnknownLanguage(primary.to_string()));
    }
    let documents = defaults
      .iter()
      .map(|(lang, doc)| (lang.clone(), Arc::new(doc.clone())))
      .collect();
    Ok(Self {
      storage,
      key: key.into(),
      primary: primary.clone(),
      defaults,
      state: RwLock::new(StoreState { active: primary, documents }),
    })
  }

  /// A store with a single, English document.
  pub fn single_language(
    storage: S,
    key: impl Into<String>,
    default: SiteDocument,
  ) -> Self {
    let lang = Language::english();
    let documents = BTreeMap::from([(lang.clone(), Arc::new(default.clone()))]);
    Self {
      storage,
      key: key.into(),
      primary: lang.clone(),
      defaults: BTreeMap::from([(lang.clone(), default)]),
      state: RwLock::new(StoreState { active: lang, documents }),
    }
  }

  /// A store seeded with the built-in English and Dutch documents.
  pub fn with_builtin_content(storage: S, key: impl Into<String>) -> Self {
    let lang = Language::english();
    let defaults = builtin_documents();
    let documents = defaults
      .iter()
      .map(|(l, d)| (l.clone(), Arc::new(d.clone())))
      .collect();
    Self {
      storage,
      key: key.into(),
      primary: lang.clone(),
      defaults,
      state: RwLock::new(StoreState { active: lang, documents }),
    }
  }

  pub fn primary_language(&self) -> &Language { &self.primary }

  /// Every supported language, in code order.
  pub fn languages(&self) -> Vec<Language> {
    self.defaults.keys().cloned().collect()
  }

  /// The key a language's document is persisted under: the fixed key for the
  /// primary language, `"{key}:{lang}"` for the rest.
  pub fn storage_key(&self, language: &Language) -> String {
    if *language == self.primary {
      self.key.clone()
    } else {
      format!("{}:{}", self.key, language)
    }
  }

  fn ensure_supported(&self, language: &Language) -> Result<()> {
    if self.defaults.contains_key(language) {
      Ok(())
    } else {
      Err(Error::UnknownLanguage(language.to_string()))
    }
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  pub fn active_language(&self) -> Language { self.state.read().active.clone() }

  /// The document presentation should render right now.
  pub fn active(&self) -> Arc<SiteDocument> {
    let state = self.state.read();
    state
      .documents
      .get(&state.active)
      .cloned()
      .unwrap_or_else(|| Arc::new(self.defaults[&self.primary].clone()))
  }

  /// The in-memory document for a specific language.
  pub fn document(&self, language: &Language) -> Result<Arc<SiteDocument>> {
    self.ensure_supported(language)?;
    let state = self.state.read();
    Ok(
      state
        .documents
        .get(language)
        .cloned()
        .unwrap_or_else(|| Arc::new(self.defaults[language].clone())),
    )
  }

  /// Switch which language's document is active. Neither document changes.
  pub fn set_language(&self, code: &str) -> Result<Language> {
    let language = Language::parse(code)?;
    self.ensure_supported(&language)?;
    self.state.write().active = language.clone();
    debug!(%language, "active language switched");
    Ok(language)
  }

  // ── Load ──────────────────────────────────────────────────────────────────

  /// Read the persisted document for `language`, falling back to its default
  /// when nothing is stored or the stored value cannot be used.
  async fn read_persisted(&self, language: &Language) -> SiteDocument {
    let key = self.storage_key(language);
    match self.storage.read(&key).await {
      Ok(Some(raw)) => match SiteDocument::from_json(&raw) {
        Ok(doc) => doc,
        Err(e) => {
          error!(%key, error = %e, "persisted site document unusable; using built-in default");
          self.defaults[language].clone()
        }
      },
      Ok(None) => {
        debug!(%key, "no persisted site document; using built-in default");
        self.defaults[language].clone()
      }
      Err(e) => {
        error!(%key, error = %e, "reading persisted site document failed; using built-in default");
        self.defaults[language].clone()
      }
    }
  }

  /// Load the active language's document from storage and make it the
  /// in-memory document. Never fails: unusable data yields the default.
  pub async fn load(&self) -> Arc<SiteDocument> {
    let language = self.active_language();
    let doc = Arc::new(self.read_persisted(&language).await);
    self.state.write().documents.insert(language, doc.clone());
    doc
  }

  /// Load every supported language.
  pub async fn load_all(&self) {
    for language in self.languages() {
      let doc = Arc::new(self.read_persisted(&language).await);
      self.state.write().documents.insert(language, doc);
    }
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// Persist `document` as the active language's document and make it
  /// visible immediately.
  pub async fn save(&self, document: SiteDocument) -> Result<Arc<SiteDocument>> {
    let language = self.active_language();
    self.save_language(&language, document).await
  }

  /// Persist `document` for `language`. On a storage failure the in-memory
  /// document is left as it was.
  pub async fn save_language(
    &self,
    language: &Language,
    mut document: SiteDocument,
  ) -> Result<Arc<SiteDocument>> {
    self.ensure_supported(language)?;
    document.schema_version = CURRENT_SCHEMA_VERSION;
    let raw = document.to_json()?;
    let key = self.storage_key(language);
    self
      .storage
      .write(&key, raw)
      .await
      .map_err(|e| Error::Storage(Box::new(e)))?;

    let doc = Arc::new(document);
    self.state.write().documents.insert(language.clone(), doc.clone());
    debug!(%key, "site document saved");
    Ok(doc)
  }

  /// Replace the in-memory document for `language` without persisting it.
  ///
  /// `update` sees the current document and returns its replacement, or
  /// `None` to leave it alone. Reading and replacing happen under one write
  /// lock, so a concurrent [`Self::save_language`] is never overwritten with
  /// a document derived from what it replaced.
  pub fn publish_with(
    &self,
    language: &Language,
    update: impl FnOnce(&SiteDocument) -> Option<SiteDocument>,
  ) -> Result<Option<Arc<SiteDocument>>> {
    self.ensure_supported(language)?;
    let mut state = self.state.write();
    let current = match state.documents.get(language) {
      Some(doc) => doc.clone(),
      None => {
        warn!(%language, "publishing over a language with no loaded document");
        Arc::new(self.defaults[language].clone())
      }
    };
    let Some(next) = update(&current) else {
      return Ok(None);
    };
    let doc = Arc::new(next);
    state.documents.insert(language.clone(), doc.clone());
    Ok(Some(doc))
  }
}

#[cfg(test)]
mod tests {
  use std::fmt;

  use super::*;
  use crate::{
    defaults::{DEFAULT_STORAGE_KEY, default_document},
    storage::MemoryStorage,
  };

  fn store(storage: MemoryStorage) -> ContentStore<MemoryStorage> {
    ContentStore::with_builtin_content(storage, DEFAULT_STORAGE_KEY)
  }

  #[tokio::test]
  async fn load_without_persisted_data_returns_default() {
    let s = store(MemoryStorage::new());
    let doc = s.load().await;
    assert_eq!(*doc, default_document());
  }

  #[tokio::test]
  async fn corrupt_persisted_data_falls_back_to_default() {
    let storage = MemoryStorage::new();
    storage.insert_raw(DEFAULT_STORAGE_KEY, "{not json");
    let doc = store(storage).load().await;
    assert_eq!(*doc, default_document());
  }

  #[tokio::test]
  async fn save_then_load_in_fresh_store_round_trips() {
    let storage = MemoryStorage::new();
    let mut doc = default_document();
    doc.branding.name = "Edited".into();
    doc.projects.remove(0);

    store(storage.clone()).save(doc.clone()).await.unwrap();

    let loaded = store(storage).load().await;
    assert_eq!(*loaded, doc);
  }

  #[tokio::test]
  async fn save_is_visible_immediately() {
    let s = store(MemoryStorage::new());
    let mut doc = default_document();
    doc.hero.title_top = "NEW".into();
    s.save(doc).await.unwrap();
    assert_eq!(s.active().hero.title_top, "NEW");
  }

  #[tokio::test]
  async fn save_stamps_current_schema_version() {
    let storage = MemoryStorage::new();
    let mut doc = default_document();
    doc.schema_version = 1;
    store(storage.clone()).save(doc).await.unwrap();

    let raw = storage.get_raw(DEFAULT_STORAGE_KEY).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["schemaVersion"], CURRENT_SCHEMA_VERSION);
  }

  #[tokio::test]
  async fn languages_are_persisted_under_separate_keys() {
    let storage = MemoryStorage::new();
    let s = store(storage.clone());
    s.set_language("nl").unwrap();

    let mut doc = (*s.active()).clone();
    doc.branding.name = "Studio NL".into();
    s.save(doc).await.unwrap();

    assert!(storage.get_raw(DEFAULT_STORAGE_KEY).is_none());
    assert!(storage.get_raw("bigboy_site_data_v2:nl").is_some());
    assert_eq!(s.document(&Language::english()).unwrap().branding.name, "BIGBOY PRODUCTIONS");
  }

  #[tokio::test]
  async fn set_language_switches_without_mutating() {
    let s = store(MemoryStorage::new());
    let en = s.active();
    s.set_language("nl").unwrap();
    let nl = s.active();
    assert_ne!(en.labels, nl.labels);
    s.set_language("en").unwrap();
    assert_eq!(s.active(), en);
  }

  #[test]
  fn unknown_language_is_rejected() {
    let s = store(MemoryStorage::new());
    assert!(matches!(s.set_language("fr"), Err(Error::UnknownLanguage(_))));
    assert_eq!(s.active_language(), Language::english());
  }

  #[test]
  fn new_requires_primary_default() {
    let result = ContentStore::new(
      MemoryStorage::new(),
      "k",
      Language::dutch(),
      BTreeMap::from([(Language::english(), default_document())]),
    );
    assert!(matches!(result, Err(Error::UnknownLanguage(_))));
  }

  #[tokio::test]
  async fn publish_does_not_persist() {
    let storage = MemoryStorage::new();
    let s = store(storage.clone());
    let mut doc = default_document();
    doc.contact.email = "x@y.z".into();
    s.publish_with(&Language::english(), |_| Some(doc)).unwrap();

    assert_eq!(s.active().contact.email, "x@y.z");
    assert!(storage.is_empty());
  }

  #[tokio::test]
  async fn publish_with_sees_the_latest_save() {
    let storage = MemoryStorage::new();
    let s = store(storage.clone());
    let mut committed = default_document();
    committed.branding.name = "COMMITTED".into();
    s.save(committed).await.unwrap();

    let published = s
      .publish_with(&Language::english(), |current| {
        let mut next = current.clone();
        next.contact.email = "x@y.z".into();
        Some(next)
      })
      .unwrap()
      .unwrap();

    assert_eq!(published.branding.name, "COMMITTED");
    assert_eq!(s.active().contact.email, "x@y.z");
  }

  #[test]
  fn publish_with_none_leaves_the_document() {
    let s = store(MemoryStorage::new());
    let before = s.active();
    assert!(s.publish_with(&Language::english(), |_| None).unwrap().is_none());
    assert!(Arc::ptr_eq(&before, &s.active()));
  }

  // ── Failing backend ───────────────────────────────────────────────────────

  #[derive(Debug)]
  struct Unavailable;

  impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str("storage unavailable")
    }
  }

  impl std::error::Error for Unavailable {}

  struct BrokenStorage;

  impl DocumentStorage for BrokenStorage {
    type Error = Unavailable;

    async fn read(&self, _: &str) -> Result<Option<String>, Unavailable> {
      Err(Unavailable)
    }

    async fn write(&self, _: &str, _: String) -> Result<(), Unavailable> {
      Err(Unavailable)
    }
  }

  #[tokio::test]
  async fn failing_backend_degrades_load_and_surfaces_save() {
    let s = ContentStore::single_language(BrokenStorage, "k", default_document());
    assert_eq!(*s.load().await, default_document());

    let mut doc = default_document();
    doc.branding.name = "Lost".into();
    assert!(matches!(s.save(doc).await, Err(Error::Storage(_))));
    assert_eq!(s.active().branding.name, "BIGBOY PRODUCTIONS");
  }
}
