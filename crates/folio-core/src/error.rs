//! Error types for `folio-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unsupported schema version {found} (newest understood is {supported})")]
  UnsupportedSchemaVersion { found: u32, supported: u32 },

  #[error("invalid language code: {0:?}")]
  InvalidLanguage(String),

  #[error("language not configured: {0}")]
  UnknownLanguage(String),

  #[error("duplicate {kind} id: {id}")]
  DuplicateId { kind: &'static str, id: String },

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
