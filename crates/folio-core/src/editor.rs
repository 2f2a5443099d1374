//! The admin editor session, a private, staged copy of the site document.
//!
//! ```text
//! LoggedOut ──passphrase──▶ Editing(structured) ⇄ Editing(raw) ──commit──▶ Committed
//!     ▲                             │                   │
//!     └────────────exit─────────────┴───────────────────┘
//! ```
//!
//! Nothing reaches the [`ContentStore`] until [`EditorSession::commit`]. Every
//! structured edit rebuilds the affected section rather than mutating records
//! in place.
//!
//! Switching from raw back to structured mode parses the raw text and adopts
//! it as the structured buffer. If the text does not parse, the switch is
//! refused and the raw text is kept.
//!
//! The passphrase gate is presentation-level access control only. The
//! passphrase and the content it guards ship to the same client, so it is not
//! a security boundary.

use std::{fmt, sync::Arc};

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
  document::{
    FormPlaceholders, GalleryEntry, PackageCategory, ServicePackage, SiteDocument,
    WorkCategory,
  },
  language::Language,
  storage::DocumentStorage,
  store::ContentStore,
};

pub const DEFAULT_PASSPHRASE: &str = "bigboyadmin";

const PLACEHOLDER_THUMBNAIL: &str =
  "https://images.unsplash.com/photo-1549643276-fdf2fab574f5?auto=format&fit=crop&q=80&w=800";

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum EditorError {
  #[error("incorrect passphrase")]
  AuthenticationFailed,

  #[error("no editing session is open")]
  NotEditing,

  #[error("this operation needs {0} mode")]
  WrongMode(EditMode),

  #[error("could not parse document: {0}")]
  Parse(String),

  #[error("unknown project: {0}")]
  UnknownProject(String),

  #[error("unknown package: {0}")]
  UnknownPackage(String),

  #[error("package {id} has no feature at index {index}")]
  FeatureOutOfRange { id: String, index: usize },

  #[error("could not save: {0}")]
  Save(#[source] crate::Error),
}

// ─── Access gate ─────────────────────────────────────────────────────────────

/// Exact, case-sensitive comparison against one shared passphrase.
#[derive(Clone)]
pub struct AccessGate {
  passphrase: String,
}

impl AccessGate {
  pub fn new(passphrase: impl Into<String>) -> Self {
    Self { passphrase: passphrase.into() }
  }

  pub fn admits(&self, attempt: &str) -> bool { attempt == self.passphrase }
}

impl Default for AccessGate {
  fn default() -> Self { Self::new(DEFAULT_PASSPHRASE) }
}

impl fmt::Debug for AccessGate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AccessGate").finish_non_exhaustive()
  }
}

// ─── Edits ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
  Structured,
  Raw,
}

impl fmt::Display for EditMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Structured => "structured",
      Self::Raw => "raw",
    })
  }
}

/// One structured change to the buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FieldEdit {
  BrandingName(String),
  BrandingDescription(String),
  HeroTitleTop(String),
  HeroTitleBottom(String),
  HeroSubtitle(String),
  HeroBackgroundUrl(String),
  HeroBackgroundVideoUrl(Option<String>),
  HeroShowreelVideoUrl(Option<String>),
  ContactEmail(String),
  ContactLocation(String),
  ContactPlaceholders(FormPlaceholders),
  /// Set a UI label, or remove it with `None`.
  Label { key: String, value: Option<String> },
  Project { id: String, edit: ProjectEdit },
  Package { id: String, edit: PackageEdit },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ProjectEdit {
  Title(String),
  Category(WorkCategory),
  Thumbnail(String),
  VideoUrl(Option<String>),
  Description(String),
  Year(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum PackageEdit {
  Name(String),
  Category(PackageCategory),
  Price(String),
  OldPrice(Option<String>),
  DiscountLabel(Option<String>),
  Description(String),
  Recommended(bool),
  Features(Vec<String>),
  Feature { index: usize, label: String },
  AddFeature(String),
  RemoveFeature(usize),
}

/// Form inputs submit empty strings for cleared optional fields.
fn non_empty(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}

impl ProjectEdit {
  fn apply(self, entry: &GalleryEntry) -> GalleryEntry {
    let mut next = entry.clone();
    match self {
      Self::Title(v) => next.title = v,
      Self::Category(v) => next.category = v,
      Self::Thumbnail(v) => next.thumbnail = v,
      Self::VideoUrl(v) => next.video_url = non_empty(v),
      Self::Description(v) => next.description = v,
      Self::Year(v) => next.year = v,
    }
    next
  }
}

impl PackageEdit {
  fn apply(self, package: &ServicePackage) -> Result<ServicePackage, EditorError> {
    let mut next = package.clone();
    match self {
      Self::Name(v) => next.name = v,
      Self::Category(v) => next.category = v,
      Self::Price(v) => next.price = v,
      Self::OldPrice(v) => next.old_price = non_empty(v),
      Self::DiscountLabel(v) => next.discount_label = non_empty(v),
      Self::Description(v) => next.description = v,
      Self::Recommended(v) => next.recommended = v,
      Self::Features(v) => next.features = v,
      Self::Feature { index, label } => {
        if index >= package.features.len() {
          return Err(EditorError::FeatureOutOfRange { id: package.id.clone(), index });
        }
        next.features = package
          .features
          .iter()
          .enumerate()
          .map(|(i, f)| if i == index { label.clone() } else { f.clone() })
          .collect();
      }
      Self::AddFeature(label) => {
        next.features = package.features.iter().cloned().chain([label]).collect();
      }
      Self::RemoveFeature(index) => {
        if index >= package.features.len() {
          return Err(EditorError::FeatureOutOfRange { id: package.id.clone(), index });
        }
        next.features = package
          .features
          .iter()
          .enumerate()
          .filter(|(i, _)| *i != index)
          .map(|(_, f)| f.clone())
          .collect();
      }
    }
    Ok(next)
  }
}

/// Produce the document that results from applying `edit` to `doc`.
pub fn apply_edit(doc: &SiteDocument, edit: FieldEdit) -> Result<SiteDocument, EditorError> {
  let mut next = doc.clone();
  match edit {
    FieldEdit::BrandingName(v) => next.branding.name = v,
    FieldEdit::BrandingDescription(v) => next.branding.description = v,
    FieldEdit::HeroTitleTop(v) => next.hero.title_top = v,
    FieldEdit::HeroTitleBottom(v) => next.hero.title_bottom = v,
    FieldEdit::HeroSubtitle(v) => next.hero.subtitle = v,
    FieldEdit::HeroBackgroundUrl(v) => next.hero.background_url = v,
    FieldEdit::HeroBackgroundVideoUrl(v) => next.hero.background_video_url = non_empty(v),
    FieldEdit::HeroShowreelVideoUrl(v) => next.hero.showreel_video_url = non_empty(v),
    FieldEdit::ContactEmail(v) => next.contact.email = v,
    FieldEdit::ContactLocation(v) => next.contact.location = v,
    FieldEdit::ContactPlaceholders(v) => next.contact.placeholders = v,
    FieldEdit::Label { key, value: Some(value) } => {
      next.labels.insert(key, value);
    }
    FieldEdit::Label { key, value: None } => {
      next.labels.remove(&key);
    }
    FieldEdit::Project { id, edit } => {
      if doc.entry(&id).is_none() {
        return Err(EditorError::UnknownProject(id));
      }
      next.projects = doc
        .projects
        .iter()
        .map(|p| if p.id == id { edit.clone().apply(p) } else { p.clone() })
        .collect();
    }
    FieldEdit::Package { id, edit } => {
      if doc.package(&id).is_none() {
        return Err(EditorError::UnknownPackage(id));
      }
      next.packages = doc
        .packages
        .iter()
        .map(|p| if p.id == id { edit.clone().apply(p) } else { Ok(p.clone()) })
        .collect::<Result<_, _>>()?;
    }
  }
  Ok(next)
}

/// A millisecond timestamp id, bumped until it collides with nothing.
fn time_based_id(taken: impl Fn(&str) -> bool) -> String {
  let mut millis = Utc::now().timestamp_millis();
  loop {
    let id = millis.to_string();
    if !taken(&id) {
      return id;
    }
    millis += 1;
  }
}

fn parse_raw(text: &str) -> Result<SiteDocument, EditorError> {
  let doc = SiteDocument::from_json(text).map_err(|e| EditorError::Parse(e.to_string()))?;
  doc
    .check_unique_ids()
    .map_err(|e| EditorError::Parse(e.to_string()))?;
  Ok(doc)
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// Externally visible session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
  LoggedOut,
  Structured,
  Raw,
  Committed,
}

enum Phase {
  LoggedOut,
  Editing {
    language: Language,
    buffer:   SiteDocument,
    /// `Some` while in raw mode.
    raw:      Option<String>,
  },
  Committed,
}

/// One operator's staged edits. Owned exclusively by the caller; the store
/// only sees the buffer on commit.
pub struct EditorSession {
  gate:       AccessGate,
  phase:      Phase,
  last_error: Option<String>,
}

impl EditorSession {
  pub fn new(gate: AccessGate) -> Self {
    Self { gate, phase: Phase::LoggedOut, last_error: None }
  }

  // ── Inspection ────────────────────────────────────────────────────────────

  pub fn state(&self) -> SessionState {
    match &self.phase {
      Phase::LoggedOut => SessionState::LoggedOut,
      Phase::Editing { raw: None, .. } => SessionState::Structured,
      Phase::Editing { raw: Some(_), .. } => SessionState::Raw,
      Phase::Committed => SessionState::Committed,
    }
  }

  /// The structured buffer. In raw mode this is the state the raw text was
  /// seeded from, not the raw text itself.
  pub fn buffer(&self) -> Option<&SiteDocument> {
    match &self.phase {
      Phase::Editing { buffer, .. } => Some(buffer),
      _ => None,
    }
  }

  pub fn raw_text(&self) -> Option<&str> {
    match &self.phase {
      Phase::Editing { raw: Some(text), .. } => Some(text),
      _ => None,
    }
  }

  /// The language the buffer was taken from and will be committed to.
  pub fn language(&self) -> Option<&Language> {
    match &self.phase {
      Phase::Editing { language, .. } => Some(language),
      _ => None,
    }
  }

  /// Message of the most recent failed operation, cleared by the next
  /// successful one.
  pub fn error(&self) -> Option<&str> { self.last_error.as_deref() }

  fn record(&mut self, error: EditorError) -> EditorError {
    self.last_error = Some(error.to_string());
    error
  }

  fn succeed<T>(&mut self, value: T) -> Result<T, EditorError> {
    self.last_error = None;
    Ok(value)
  }

  // ── Transitions ───────────────────────────────────────────────────────────

  /// Open the session with a private copy of the store's active document.
  pub fn submit_passphrase<S: DocumentStorage>(
    &mut self,
    attempt: &str,
    store: &ContentStore<S>,
  ) -> Result<(), EditorError> {
    if !self.gate.admits(attempt) {
      warn!("admin login rejected");
      return Err(self.record(EditorError::AuthenticationFailed));
    }
    if matches!(self.phase, Phase::Editing { .. }) {
      return self.succeed(());
    }
    self.phase = Phase::Editing {
      language: store.active_language(),
      buffer:   (*store.active()).clone(),
      raw:      None,
    };
    info!("admin session opened");
    self.succeed(())
  }

  /// Discard the buffer and return to `LoggedOut`.
  pub fn exit(&mut self) {
    self.phase = Phase::LoggedOut;
    self.last_error = None;
  }

  /// Seed the raw editor with the pretty-printed buffer.
  pub fn select_raw_mode(&mut self) -> Result<(), EditorError> {
    let result = match &mut self.phase {
      Phase::Editing { raw: Some(_), .. } => Ok(()),
      Phase::Editing { buffer, raw, .. } => buffer
        .to_json_pretty()
        .map(|text| *raw = Some(text))
        .map_err(|e| EditorError::Parse(e.to_string())),
      _ => Err(EditorError::NotEditing),
    };
    match result {
      Ok(()) => self.succeed(()),
      Err(e) => Err(self.record(e)),
    }
  }

  /// Parse the raw text back into the structured buffer. Refused, with the
  /// raw text kept, if it does not parse.
  pub fn select_structured_mode(&mut self) -> Result<(), EditorError> {
    let result = match &mut self.phase {
      Phase::Editing { buffer, raw, .. } => match raw.as_deref().map(parse_raw) {
        None => Ok(()),
        Some(Ok(doc)) => {
          *buffer = doc;
          *raw = None;
          Ok(())
        }
        Some(Err(e)) => Err(e),
      },
      _ => Err(EditorError::NotEditing),
    };
    match result {
      Ok(()) => self.succeed(()),
      Err(e) => Err(self.record(e)),
    }
  }

  /// Replace the raw text. Only valid in raw mode.
  pub fn set_raw_text(&mut self, text: impl Into<String>) -> Result<(), EditorError> {
    match &mut self.phase {
      Phase::Editing { raw: Some(current), .. } => {
        *current = text.into();
        self.succeed(())
      }
      Phase::Editing { .. } => Err(self.record(EditorError::WrongMode(EditMode::Raw))),
      _ => Err(self.record(EditorError::NotEditing)),
    }
  }

  /// Run `f` over the structured buffer, replacing it with the result.
  fn edit_buffer<T>(
    &mut self,
    f: impl FnOnce(&SiteDocument) -> Result<(SiteDocument, T), EditorError>,
  ) -> Result<T, EditorError> {
    let result = match &mut self.phase {
      Phase::Editing { buffer, raw: None, .. } => f(buffer).map(|(next, value)| {
        *buffer = next;
        value
      }),
      Phase::Editing { .. } => Err(EditorError::WrongMode(EditMode::Structured)),
      _ => Err(EditorError::NotEditing),
    };
    match result {
      Ok(value) => self.succeed(value),
      Err(e) => Err(self.record(e)),
    }
  }

  /// Apply one structured field edit to the buffer.
  pub fn edit(&mut self, edit: FieldEdit) -> Result<(), EditorError> {
    self.edit_buffer(|doc| apply_edit(doc, edit).map(|next| (next, ())))
  }

  /// Append a placeholder project and return its id.
  pub fn add_project(&mut self) -> Result<String, EditorError> {
    self.edit_buffer(|doc| {
      let id = time_based_id(|candidate| doc.entry(candidate).is_some());
      let entry = GalleryEntry {
        id:          id.clone(),
        title:       "New Project".to_owned(),
        category:    WorkCategory::Photography,
        folder:      None,
        thumbnail:   PLACEHOLDER_THUMBNAIL.to_owned(),
        video_url:   None,
        description: "Project description".to_owned(),
        year:        Utc::now().year().to_string(),
      };
      let mut next = doc.clone();
      next.projects = doc.projects.iter().cloned().chain([entry]).collect();
      Ok((next, id))
    })
  }

  pub fn delete_project(&mut self, id: &str) -> Result<(), EditorError> {
    self.edit_buffer(|doc| {
      if doc.entry(id).is_none() {
        return Err(EditorError::UnknownProject(id.to_owned()));
      }
      let mut next = doc.clone();
      next.projects = doc.projects.iter().filter(|p| p.id != id).cloned().collect();
      Ok((next, ()))
    })
  }

  /// Append a placeholder package and return its id.
  pub fn add_package(&mut self) -> Result<String, EditorError> {
    self.edit_buffer(|doc| {
      let id = time_based_id(|candidate| doc.package(candidate).is_some());
      let package = ServicePackage {
        id:             id.clone(),
        name:           "New Package".to_owned(),
        category:       PackageCategory::Photography,
        price:          "€0".to_owned(),
        old_price:      None,
        discount_label: None,
        description:    "Package description".to_owned(),
        features:       Vec::new(),
        recommended:    false,
      };
      let mut next = doc.clone();
      next.packages = doc.packages.iter().cloned().chain([package]).collect();
      Ok((next, id))
    })
  }

  pub fn delete_package(&mut self, id: &str) -> Result<(), EditorError> {
    self.edit_buffer(|doc| {
      if doc.package(id).is_none() {
        return Err(EditorError::UnknownPackage(id.to_owned()));
      }
      let mut next = doc.clone();
      next.packages = doc.packages.iter().filter(|p| p.id != id).cloned().collect();
      Ok((next, ()))
    })
  }

  /// In raw mode, parse the text into the buffer first.
  fn pending_document(&mut self) -> Result<(Language, SiteDocument), EditorError> {
    match &mut self.phase {
      Phase::Editing { language, buffer, raw } => {
        if let Some(text) = raw {
          *buffer = parse_raw(text)?;
        }
        Ok((language.clone(), buffer.clone()))
      }
      _ => Err(EditorError::NotEditing),
    }
  }

  /// Save the buffer through the store. On failure the session stays in its
  /// editing mode with buffer and raw text untouched.
  pub async fn commit<S: DocumentStorage>(
    &mut self,
    store: &ContentStore<S>,
  ) -> Result<Arc<SiteDocument>, EditorError> {
    let (language, document) = match self.pending_document() {
      Ok(pending) => pending,
      Err(e) => return Err(self.record(e)),
    };
    match store.save_language(&language, document).await {
      Ok(saved) => {
        info!(%language, "admin changes committed");
        self.phase = Phase::Committed;
        self.succeed(saved)
      }
      Err(e) => Err(self.record(EditorError::Save(e))),
    }
  }
}

impl fmt::Debug for EditorSession {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("EditorSession")
      .field("state", &self.state())
      .field("error", &self.last_error)
      .finish_non_exhaustive()
  }
}
