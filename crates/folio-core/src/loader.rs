//! Startup content loading and the gallery merge policy.
//!
//! The loader reads the persisted baseline, asks a [`FolderImporter`] for the
//! contents of every configured remote folder, and appends entries whose ids
//! the baseline does not already contain. The merge is append-only and keyed
//! purely on id; it publishes the result in memory but never persists it.

use std::{collections::HashSet, future::Future, sync::Arc};

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
  document::{GalleryEntry, SiteDocument, WorkCategory},
  storage::DocumentStorage,
  store::ContentStore,
};

// ─── Importer seam ───────────────────────────────────────────────────────────

/// A source of gallery entries for a named remote folder.
///
/// Implementations absorb their own failures: an unreachable, missing, or
/// rate-limited folder yields an empty list.
pub trait FolderImporter: Send + Sync {
  fn import_folder<'a>(
    &'a self,
    folder: &'a str,
    category: WorkCategory,
  ) -> impl Future<Output = Vec<GalleryEntry>> + Send + 'a;
}

/// A remote folder bound to the category its images are filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFolder {
  pub folder:   String,
  pub category: WorkCategory,
}

impl RemoteFolder {
  pub fn new(folder: impl Into<String>, category: WorkCategory) -> Self {
    Self { folder: folder.into(), category }
  }
}

/// The folders the studio site has always pulled from.
pub fn default_folders() -> Vec<RemoteFolder> {
  vec![
    RemoteFolder::new("concert", WorkCategory::Photography),
    RemoteFolder::new("clothing", WorkCategory::Photography),
  ]
}

// ─── Merge policy ────────────────────────────────────────────────────────────

/// Append every candidate whose id is not yet in `baseline`'s gallery.
///
/// Returns `None` when nothing would be added, so callers can skip a
/// pointless republish. Candidates repeating an id among themselves are kept
/// once, first occurrence wins.
pub fn merge_imported(
  baseline: &SiteDocument,
  candidates: Vec<GalleryEntry>,
) -> Option<SiteDocument> {
  let mut known: HashSet<String> =
    baseline.projects.iter().map(|p| p.id.clone()).collect();
  let fresh: Vec<GalleryEntry> = candidates
    .into_iter()
    .filter(|entry| known.insert(entry.id.clone()))
    .collect();

  if fresh.is_empty() {
    return None;
  }

  let mut merged = baseline.clone();
  merged.projects.extend(fresh);
  Some(merged)
}

// ─── Loader ──────────────────────────────────────────────────────────────────

/// Runs the load → import → merge → publish sequence.
pub struct ContentLoader<S, I> {
  store:    Arc<ContentStore<S>>,
  importer: Arc<I>,
  folders:  Vec<RemoteFolder>,
}

impl<S, I> ContentLoader<S, I>
where
  S: DocumentStorage,
  I: FolderImporter,
{
  pub fn new(
    store: Arc<ContentStore<S>>,
    importer: Arc<I>,
    folders: Vec<RemoteFolder>,
  ) -> Self {
    Self { store, importer, folders }
  }

  /// Load the persisted baseline for every language. Synchronous with
  /// respect to the network: no remote request is made.
  pub async fn load_baseline(&self) -> Arc<SiteDocument> {
    self.store.load_all().await;
    self.store.active()
  }

  /// Query every folder concurrently and concatenate the results in folder
  /// order.
  pub async fn fetch_candidates(&self) -> Vec<GalleryEntry> {
    let imports = self
      .folders
      .iter()
      .map(|f| self.importer.import_folder(&f.folder, f.category));
    join_all(imports).await.into_iter().flatten().collect()
  }

  /// Merge remote entries into every language's in-memory document.
  /// Returns the number of entries added to the active document.
  pub async fn enrich(&self) -> usize {
    let candidates = self.fetch_candidates().await;
    if candidates.is_empty() {
      debug!("no remote gallery entries to merge");
      return 0;
    }

    let active = self.store.active_language();
    let mut added_to_active = 0;
    for language in self.store.languages() {
      let mut added = 0;
      let published = self.store.publish_with(&language, |baseline| {
        let merged = merge_imported(baseline, candidates.clone())?;
        added = merged.projects.len() - baseline.projects.len();
        Some(merged)
      });
      if let Ok(Some(_)) = published {
        info!(%language, added, "merged remote gallery entries");
        if language == active {
          added_to_active = added;
        }
      }
    }
    added_to_active
  }

  /// The full startup sequence: baseline, then enrichment.
  pub async fn initialize(&self) -> Arc<SiteDocument> {
    self.load_baseline().await;
    self.enrich().await;
    self.store.active()
  }
}
