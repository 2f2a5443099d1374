//! The site document: every piece of editable copy on the site.
//!
//! A [`SiteDocument`] is persisted as a single JSON value. Field names are
//! camelCase on the wire so documents written by earlier builds keep loading.
//!
//! Evolution is additive-only: every field introduced after schema version 1
//! carries a serde default, and documents without a `schemaVersion` are read
//! as version 1.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The schema version stamped on every document this build writes.
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

const LEGACY_SCHEMA_VERSION: u32 = 1;

fn legacy_schema_version() -> u32 { LEGACY_SCHEMA_VERSION }

// ─── Categories ──────────────────────────────────────────────────────────────

/// The closed set of portfolio disciplines.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum WorkCategory {
  Photography,
  Cinematography,
  Commercial,
  Documentary,
}

impl WorkCategory {
  pub const ALL: [WorkCategory; 4] = [
    Self::Photography,
    Self::Cinematography,
    Self::Commercial,
    Self::Documentary,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Photography => "Photography",
      Self::Cinematography => "Cinematography",
      Self::Commercial => "Commercial",
      Self::Documentary => "Documentary",
    }
  }
}

/// The closed set of service-package groupings.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum PackageCategory {
  Photography,
  Videography,
  Combo,
}

// ─── Sections ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branding {
  pub name:        String,
  pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
  pub title_top:            String,
  pub title_bottom:         String,
  pub subtitle:             String,
  /// Still image shown while (or instead of) the background video loads.
  pub background_url:       String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub background_video_url: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub showreel_video_url:   Option<String>,
}

/// Placeholder text for the public contact form. Unset fields fall back to
/// whatever the presentation layer hardcodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormPlaceholders {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub email:   Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub dates:   Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
}

impl FormPlaceholders {
  pub fn is_empty(&self) -> bool {
    self.name.is_none()
      && self.email.is_none()
      && self.dates.is_none()
      && self.message.is_none()
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
  pub email:        String,
  pub location:     String,
  #[serde(default, skip_serializing_if = "FormPlaceholders::is_empty")]
  pub placeholders: FormPlaceholders,
}

// ─── Gallery ─────────────────────────────────────────────────────────────────

/// One portfolio work. `id` is unique within a document's gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryEntry {
  pub id:          String,
  pub title:       String,
  pub category:    WorkCategory,
  /// Remote folder the entry was imported from, if any.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub folder:      Option<String>,
  pub thumbnail:   String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub video_url:   Option<String>,
  pub description: String,
  /// Display year; free text, not validated as a number.
  pub year:        String,
}

// ─── Services ────────────────────────────────────────────────────────────────

/// One purchasable offering. Prices are display strings so locale-specific
/// formatting (`€1.495`) survives untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePackage {
  pub id:             String,
  pub name:           String,
  pub category:       PackageCategory,
  pub price:          String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub old_price:      Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub discount_label: Option<String>,
  pub description:    String,
  pub features:       Vec<String>,
  #[serde(default)]
  pub recommended:    bool,
}

// ─── Document ────────────────────────────────────────────────────────────────

/// UI label strings of a localized document, keyed by label name.
pub type UiLabels = BTreeMap<String, String>;

/// The root aggregate: all editable content for one language of the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteDocument {
  #[serde(default = "legacy_schema_version")]
  pub schema_version: u32,
  pub branding:       Branding,
  pub hero:           Hero,
  pub contact:        ContactInfo,
  pub projects:       Vec<GalleryEntry>,
  pub packages:       Vec<ServicePackage>,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub labels:         UiLabels,
}

impl SiteDocument {
  /// Parse a persisted or operator-supplied document.
  ///
  /// Rejects documents written by a newer schema than this build knows.
  pub fn from_json(raw: &str) -> Result<Self> {
    let doc: Self = serde_json::from_str(raw)?;
    if doc.schema_version > CURRENT_SCHEMA_VERSION {
      return Err(Error::UnsupportedSchemaVersion {
        found:     doc.schema_version,
        supported: CURRENT_SCHEMA_VERSION,
      });
    }
    Ok(doc)
  }

  /// Compact serialisation used for storage.
  pub fn to_json(&self) -> Result<String> { Ok(serde_json::to_string(self)?) }

  /// Indented serialisation used to seed the raw editor.
  pub fn to_json_pretty(&self) -> Result<String> {
    Ok(serde_json::to_string_pretty(self)?)
  }

  /// Fail on the first repeated gallery or package id.
  pub fn check_unique_ids(&self) -> Result<()> {
    let mut seen = HashSet::new();
    for entry in &self.projects {
      if !seen.insert(entry.id.as_str()) {
        return Err(Error::DuplicateId { kind: "project", id: entry.id.clone() });
      }
    }
    let mut seen = HashSet::new();
    for package in &self.packages {
      if !seen.insert(package.id.as_str()) {
        return Err(Error::DuplicateId { kind: "package", id: package.id.clone() });
      }
    }
    Ok(())
  }

  pub fn gallery_ids(&self) -> HashSet<&str> {
    self.projects.iter().map(|p| p.id.as_str()).collect()
  }

  pub fn entry(&self, id: &str) -> Option<&GalleryEntry> {
    self.projects.iter().find(|p| p.id == id)
  }

  pub fn package(&self, id: &str) -> Option<&ServicePackage> {
    self.packages.iter().find(|p| p.id == id)
  }

  /// Number of gallery entries per category; categories without entries are
  /// omitted.
  pub fn count_by_category(&self) -> BTreeMap<WorkCategory, usize> {
    let mut counts = BTreeMap::new();
    for entry in &self.projects {
      *counts.entry(entry.category).or_insert(0) += 1;
    }
    counts
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::defaults::default_document;

  #[test]
  fn legacy_document_without_new_fields_loads() {
    let raw = r#"{
      "branding": {"name": "Studio", "description": "d"},
      "hero": {"titleTop": "A", "titleBottom": "B", "subtitle": "s", "backgroundUrl": "bg.jpg"},
      "contact": {"email": "a@b.c", "location": "Utrecht"},
      "projects": [
        {"id": "p1", "title": "T", "category": "Documentary", "thumbnail": "t.jpg", "description": "", "year": "2023"}
      ],
      "packages": [
        {"id": "k1", "name": "N", "category": "Combo", "price": "€10", "description": "", "features": ["x"]}
      ]
    }"#;

    let doc = SiteDocument::from_json(raw).unwrap();
    assert_eq!(doc.schema_version, 1);
    assert!(doc.labels.is_empty());
    assert!(doc.contact.placeholders.is_empty());
    assert!(!doc.packages[0].recommended);
    assert_eq!(doc.projects[0].folder, None);
  }

  #[test]
  fn newer_schema_is_rejected() {
    let mut doc = default_document();
    doc.schema_version = CURRENT_SCHEMA_VERSION + 1;
    let raw = doc.to_json().unwrap();
    assert!(matches!(
      SiteDocument::from_json(&raw),
      Err(Error::UnsupportedSchemaVersion { found, .. }) if found == CURRENT_SCHEMA_VERSION + 1
    ));
  }

  #[test]
  fn wire_names_are_camel_case() {
    let doc = default_document();
    let value = serde_json::to_value(&doc).unwrap();
    assert!(value["hero"].get("titleTop").is_some());
    assert!(value.get("schemaVersion").is_some());
    let video = value["projects"]
      .as_array()
      .unwrap()
      .iter()
      .find(|p| p.get("videoUrl").is_some());
    assert!(video.is_some());
  }

  #[test]
  fn duplicate_project_id_detected() {
    let mut doc = default_document();
    let dup = doc.projects[0].clone();
    doc.projects.push(dup);
    assert!(matches!(
      doc.check_unique_ids(),
      Err(Error::DuplicateId { kind: "project", .. })
    ));
  }

  #[test]
  fn default_counts_per_category() {
    let counts = default_document().count_by_category();
    assert_eq!(counts[&WorkCategory::Photography], 5);
    assert_eq!(counts[&WorkCategory::Cinematography], 2);
    assert_eq!(counts[&WorkCategory::Commercial], 1);
    assert_eq!(counts[&WorkCategory::Documentary], 1);
  }
}
