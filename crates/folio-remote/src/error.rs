use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("remote folder not found: {0}")]
  NotFound(String),

  #[error("remote API rate limit exceeded")]
  RateLimited,

  #[error("unexpected status {0}")]
  Status(StatusCode),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
