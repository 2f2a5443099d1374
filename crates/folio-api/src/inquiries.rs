//! Contact-form endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/inquiries/draft` | Body: `{"package":"<id>"}`, `{"project":"<id>"}` or `{}` |
//! | `POST` | `/inquiries` | Body: the form; relayed, 502 if the relay fails |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use folio_core::{
  inquiry::{InquiryDraft, InquiryForm, InquirySubmission, InquiryTracker},
  storage::DocumentStorage,
};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::{AppState, error::ApiError};

// ─── Draft ────────────────────────────────────────────────────────────────────

/// Which affordance sent the visitor to the form. At most one of the ids is
/// expected; with neither the draft is a custom inquiry.
#[derive(Debug, Deserialize, Default)]
pub struct DraftBody {
  pub package: Option<String>,
  pub project: Option<String>,
}

/// `POST /inquiries/draft`
pub async fn draft<S: DocumentStorage>(
  State(state): State<AppState<S>>,
  Json(body): Json<DraftBody>,
) -> Result<Json<InquiryDraft>, ApiError> {
  let document = state.store.active();
  let mut tracker = InquiryTracker::new();

  match (body.package, body.project) {
    (Some(_), Some(_)) => {
      return Err(ApiError::BadRequest("give either a package or a project".into()));
    }
    (Some(id), None) => {
      let package = document
        .package(&id)
        .ok_or_else(|| ApiError::NotFound(format!("package {id} not found")))?;
      tracker.book_package(package);
    }
    (None, Some(id)) => {
      let entry = document
        .entry(&id)
        .ok_or_else(|| ApiError::NotFound(format!("project {id} not found")))?;
      tracker.inquire_project(entry);
    }
    (None, None) => {
      tracker.custom_inquiry();
    }
  }

  let context = tracker
    .take()
    .ok_or_else(|| ApiError::BadRequest("no inquiry context".into()))?;
  Ok(Json(InquiryDraft::from_context(&context, &state.inquiries.greeting)))
}

// ─── Submit ───────────────────────────────────────────────────────────────────

/// `POST /inquiries`
pub async fn submit<S: DocumentStorage>(
  State(state): State<AppState<S>>,
  Json(form): Json<InquiryForm>,
) -> Result<impl IntoResponse, ApiError> {
  if form.name.trim().is_empty() || form.email.trim().is_empty() {
    return Err(ApiError::BadRequest("name and email are required".into()));
  }

  let submission = InquirySubmission::from_form(
    form,
    &state.inquiries.fallback_subject,
    &state.inquiries.template,
  );
  debug!(subject = %submission.subject, "relaying inquiry");
  state.relay.submit(&submission).await?;
  Ok((StatusCode::ACCEPTED, Json(json!({ "subject": submission.subject }))))
}
