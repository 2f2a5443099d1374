//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use folio_core::editor::EditorError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("unauthorized: {0}")]
  Unauthorized(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("unprocessable: {0}")]
  Unprocessable(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("relay error: {0}")]
  Relay(#[source] folio_remote::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<folio_core::Error> for ApiError {
  fn from(e: folio_core::Error) -> Self {
    use folio_core::Error as CoreError;
    match e {
      CoreError::UnknownLanguage(_) => ApiError::NotFound(e.to_string()),
      CoreError::InvalidLanguage(_) => ApiError::BadRequest(e.to_string()),
      other => ApiError::Store(Box::new(other)),
    }
  }
}

impl From<EditorError> for ApiError {
  fn from(e: EditorError) -> Self {
    match e {
      EditorError::AuthenticationFailed => ApiError::Unauthorized(e.to_string()),
      EditorError::NotEditing | EditorError::WrongMode(_) => {
        ApiError::Conflict(e.to_string())
      }
      EditorError::Parse(_) => ApiError::Unprocessable(e.to_string()),
      EditorError::UnknownProject(_) | EditorError::UnknownPackage(_) => {
        ApiError::NotFound(e.to_string())
      }
      EditorError::FeatureOutOfRange { .. } => ApiError::BadRequest(e.to_string()),
      EditorError::Save(inner) => ApiError::Store(Box::new(inner)),
    }
  }
}

impl From<folio_remote::Error> for ApiError {
  fn from(e: folio_remote::Error) -> Self { ApiError::Relay(e) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m.clone()),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Unprocessable(m) => (StatusCode::UNPROCESSABLE_ENTITY, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Relay(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
