//! Gallery import from a GitHub repository folder.
//!
//! Lists `/repos/{owner}/{repo}/contents/{folder}` and maps every image file
//! to a [`GalleryEntry`] with id `gh-{sha}`. The blob SHA makes the id stable
//! across runs, so the merge recognises files it has already seen.

use std::time::Duration;

use chrono::{Datelike, Utc};
use folio_core::{
  document::{GalleryEntry, WorkCategory},
  loader::FolderImporter,
};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::{
  Error, Result,
  naming::{format_title, is_image_file, natural_cmp},
};

/// Which repository to list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoConfig {
  pub api_base:   String,
  pub owner:      String,
  pub repository: String,
}

impl Default for RepoConfig {
  fn default() -> Self {
    Self {
      api_base:   "https://api.github.com".to_owned(),
      owner:      "liamwoudenberg-lang".to_owned(),
      repository: "portfolio".to_owned(),
    }
  }
}

/// One item of a contents listing. Only the fields the import reads.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentItem {
  pub name:         String,
  #[serde(rename = "type")]
  pub kind:         String,
  pub sha:          String,
  #[serde(default)]
  pub download_url: Option<String>,
}

/// Turn a folder listing into gallery entries: image files only, in natural
/// filename order.
pub fn entries_from_listing(
  items: Vec<ContentItem>,
  folder: &str,
  category: WorkCategory,
  year: &str,
) -> Vec<GalleryEntry> {
  let mut images: Vec<ContentItem> = items
    .into_iter()
    .filter(|item| item.kind == "file" && is_image_file(&item.name))
    .collect();
  images.sort_by(|a, b| natural_cmp(&a.name, &b.name));

  images
    .into_iter()
    .map(|item| GalleryEntry {
      id:          format!("gh-{}", item.sha),
      title:       format_title(&item.name),
      category,
      folder:      Some(folder.to_owned()),
      thumbnail:   item.download_url.unwrap_or_default(),
      video_url:   None,
      description: format!("Imported from GitHub /{folder}"),
      year:        year.to_owned(),
    })
    .collect()
}

// ─── Importer ────────────────────────────────────────────────────────────────

/// Lists repository folders over the GitHub REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct GithubImporter {
  client: Client,
  repo:   RepoConfig,
}

impl GithubImporter {
  pub fn new(repo: RepoConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
      .build()?;
    Ok(Self { client, repo })
  }

  pub fn repo(&self) -> &RepoConfig { &self.repo }

  fn contents_url(&self, folder: &str) -> String {
    format!(
      "{}/repos/{}/{}/contents/{}",
      self.repo.api_base.trim_end_matches('/'),
      self.repo.owner,
      self.repo.repository,
      folder.trim_matches('/'),
    )
  }

  /// `GET /repos/{owner}/{repo}/contents/{folder}`
  pub async fn list_folder(&self, folder: &str) -> Result<Vec<ContentItem>> {
    let resp = self
      .client
      .get(self.contents_url(folder))
      .header(reqwest::header::ACCEPT, "application/vnd.github+json")
      .send()
      .await?;

    match resp.status() {
      status if status.is_success() => {
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
      }
      StatusCode::NOT_FOUND => Err(Error::NotFound(folder.to_owned())),
      StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => Err(Error::RateLimited),
      status => Err(Error::Status(status)),
    }
  }

  /// List and map a folder, surfacing every failure.
  pub async fn try_import(
    &self,
    folder: &str,
    category: WorkCategory,
  ) -> Result<Vec<GalleryEntry>> {
    let items = self.list_folder(folder).await?;
    let year = Utc::now().year().to_string();
    Ok(entries_from_listing(items, folder, category, &year))
  }
}

impl FolderImporter for GithubImporter {
  async fn import_folder(&self, folder: &str, category: WorkCategory) -> Vec<GalleryEntry> {
    match self.try_import(folder, category).await {
      Ok(entries) => {
        debug!(folder, count = entries.len(), "imported remote folder");
        entries
      }
      Err(Error::NotFound(_)) => {
        warn!(
          folder,
          owner = %self.repo.owner,
          repository = %self.repo.repository,
          "remote folder not found"
        );
        Vec::new()
      }
      Err(Error::RateLimited) => {
        warn!(folder, "remote API rate limit exceeded; using stored content only");
        Vec::new()
      }
      Err(e) => {
        error!(folder, error = %e, "importing remote folder failed");
        Vec::new()
      }
    }
  }
}
