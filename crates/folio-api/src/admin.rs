//! Handlers for the `/admin` editor endpoints.
//!
//! All of them operate on the single shared [`EditorSession`]. Nothing is
//! visible on the public routes until `POST /admin/commit`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST`   | `/admin/login` | Body: `{"passphrase":"…"}`; 401 if wrong |
//! | `GET`    | `/admin/session` | State, buffer, raw text, last error |
//! | `POST`   | `/admin/mode` | Body: `{"mode":"raw"\|"structured"}`; 422 if raw text does not parse |
//! | `POST`   | `/admin/edit` | Body: a `FieldEdit` |
//! | `PUT`    | `/admin/raw` | Body: `{"text":"…"}` |
//! | `POST`   | `/admin/projects` | 201 with `{"id":"…"}` |
//! | `DELETE` | `/admin/projects/{id}` | 404 if unknown |
//! | `POST`   | `/admin/packages` | 201 with `{"id":"…"}` |
//! | `DELETE` | `/admin/packages/{id}` | 404 if unknown |
//! | `POST`   | `/admin/commit` | Saves through the store |
//! | `POST`   | `/admin/exit` | Discards the buffer |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use folio_core::{
  document::SiteDocument,
  editor::{EditMode, EditorSession, FieldEdit, SessionState},
  language::Language,
  storage::DocumentStorage,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{AppState, error::ApiError};

/// Snapshot of the editor session as the dashboard renders it.
#[derive(Debug, Serialize)]
pub struct SessionView {
  pub state:    SessionState,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub language: Option<Language>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub document: Option<SiteDocument>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub raw:      Option<String>,
  pub error:    Option<String>,
}

impl SessionView {
  pub fn of(session: &EditorSession) -> Self {
    Self {
      state:    session.state(),
      language: session.language().cloned(),
      document: session.buffer().cloned(),
      raw:      session.raw_text().map(str::to_owned),
      error:    session.error().map(str::to_owned),
    }
  }
}

// ─── Session lifecycle ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub passphrase: String,
}

/// `POST /admin/login`
pub async fn login<S: DocumentStorage>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginBody>,
) -> Result<Json<SessionView>, ApiError> {
  let mut session = state.session.lock().await;
  session.submit_passphrase(&body.passphrase, &*state.store)?;
  Ok(Json(SessionView::of(&session)))
}

/// `GET /admin/session`
pub async fn session<S: DocumentStorage>(
  State(state): State<AppState<S>>,
) -> Json<SessionView> {
  let session = state.session.lock().await;
  Json(SessionView::of(&session))
}

/// `POST /admin/exit`
pub async fn exit<S: DocumentStorage>(State(state): State<AppState<S>>) -> StatusCode {
  state.session.lock().await.exit();
  StatusCode::NO_CONTENT
}

// ─── Modes ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ModeBody {
  pub mode: EditMode,
}

/// `POST /admin/mode`
pub async fn mode<S: DocumentStorage>(
  State(state): State<AppState<S>>,
  Json(body): Json<ModeBody>,
) -> Result<Json<SessionView>, ApiError> {
  let mut session = state.session.lock().await;
  match body.mode {
    EditMode::Raw => session.select_raw_mode()?,
    EditMode::Structured => session.select_structured_mode()?,
  }
  Ok(Json(SessionView::of(&session)))
}

#[derive(Debug, Deserialize)]
pub struct RawBody {
  pub text: String,
}

/// `PUT /admin/raw`
pub async fn raw<S: DocumentStorage>(
  State(state): State<AppState<S>>,
  Json(body): Json<RawBody>,
) -> Result<Json<SessionView>, ApiError> {
  let mut session = state.session.lock().await;
  session.set_raw_text(body.text)?;
  Ok(Json(SessionView::of(&session)))
}

// ─── Structured edits ─────────────────────────────────────────────────────────

/// `POST /admin/edit`
pub async fn edit<S: DocumentStorage>(
  State(state): State<AppState<S>>,
  Json(edit): Json<FieldEdit>,
) -> Result<Json<SessionView>, ApiError> {
  let mut session = state.session.lock().await;
  session.edit(edit)?;
  Ok(Json(SessionView::of(&session)))
}

/// `POST /admin/projects`
pub async fn add_project<S: DocumentStorage>(
  State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, ApiError> {
  let id = state.session.lock().await.add_project()?;
  Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// `DELETE /admin/projects/{id}`
pub async fn delete_project<S: DocumentStorage>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
  state.session.lock().await.delete_project(&id)?;
  Ok(StatusCode::NO_CONTENT)
}

/// `POST /admin/packages`
pub async fn add_package<S: DocumentStorage>(
  State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, ApiError> {
  let id = state.session.lock().await.add_package()?;
  Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// `DELETE /admin/packages/{id}`
pub async fn delete_package<S: DocumentStorage>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
  state.session.lock().await.delete_package(&id)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Commit ───────────────────────────────────────────────────────────────────

/// `POST /admin/commit`. Returns the saved document.
pub async fn commit<S: DocumentStorage>(
  State(state): State<AppState<S>>,
) -> Result<Json<SiteDocument>, ApiError> {
  let mut session = state.session.lock().await;
  let saved = session.commit(&*state.store).await?;
  Ok(Json(SiteDocument::clone(&saved)))
}

#[cfg(test)]
mod tests {
  use axum::http::StatusCode;
  use folio_core::{defaults::DEFAULT_STORAGE_KEY, editor::DEFAULT_PASSPHRASE};
  use serde_json::json;

  use crate::test_support::*;

  const NO_RELAY: &str = "http://127.0.0.1:1";

  async fn login(state: &crate::AppState<folio_core::storage::MemoryStorage>) {
    expect(
      state,
      "POST",
      "/admin/login",
      Some(json!({ "passphrase": DEFAULT_PASSPHRASE })),
      StatusCode::OK,
    )
    .await;
  }

  #[tokio::test]
  async fn wrong_passphrase_is_401_and_stays_logged_out() {
    let (_, state) = make_state(NO_RELAY);
    let body = expect(
      &state,
      "POST",
      "/admin/login",
      Some(json!({ "passphrase": "nope" })),
      StatusCode::UNAUTHORIZED,
    )
    .await;
    assert!(body["error"].as_str().unwrap().contains("passphrase"));

    let view = expect(&state, "GET", "/admin/session", None, StatusCode::OK).await;
    assert_eq!(view["state"], "logged_out");
    assert!(view["error"].is_string());
  }

  #[tokio::test]
  async fn open_session_does_not_admit_a_wrong_passphrase() {
    let (_, state) = make_state(NO_RELAY);
    login(&state).await;
    expect(
      &state,
      "POST",
      "/admin/edit",
      Some(json!({ "field": "branding_name", "value": "STAGED" })),
      StatusCode::OK,
    )
    .await;

    let body = expect(
      &state,
      "POST",
      "/admin/login",
      Some(json!({ "passphrase": "nope" })),
      StatusCode::UNAUTHORIZED,
    )
    .await;
    assert!(body.get("document").is_none());

    let view = expect(&state, "GET", "/admin/session", None, StatusCode::OK).await;
    assert_eq!(view["state"], "structured");
    assert_eq!(view["document"]["branding"]["name"], "STAGED");
    assert!(view["error"].is_string());
  }

  #[tokio::test]
  async fn edits_need_a_session() {
    let (_, state) = make_state(NO_RELAY);
    expect(
      &state,
      "POST",
      "/admin/edit",
      Some(json!({ "field": "branding_name", "value": "X" })),
      StatusCode::CONFLICT,
    )
    .await;
    expect(&state, "POST", "/admin/commit", None, StatusCode::CONFLICT).await;
  }

  #[tokio::test]
  async fn structured_edit_is_private_until_commit() {
    let (storage, state) = make_state(NO_RELAY);
    login(&state).await;

    let view = expect(
      &state,
      "POST",
      "/admin/edit",
      Some(json!({ "field": "hero_title_top", "value": "EDITED" })),
      StatusCode::OK,
    )
    .await;
    assert_eq!(view["state"], "structured");
    assert_eq!(view["document"]["hero"]["titleTop"], "EDITED");

    let public = expect(&state, "GET", "/content", None, StatusCode::OK).await;
    assert_eq!(public["hero"]["titleTop"], "BIGBOY");

    let saved = expect(&state, "POST", "/admin/commit", None, StatusCode::OK).await;
    assert_eq!(saved["hero"]["titleTop"], "EDITED");
    let public = expect(&state, "GET", "/content", None, StatusCode::OK).await;
    assert_eq!(public["hero"]["titleTop"], "EDITED");
    assert!(storage.get_raw(DEFAULT_STORAGE_KEY).is_some());

    let view = expect(&state, "GET", "/admin/session", None, StatusCode::OK).await;
    assert_eq!(view["state"], "committed");
  }

  #[tokio::test]
  async fn project_edits_by_id() {
    let (_, state) = make_state(NO_RELAY);
    login(&state).await;

    let created = expect(&state, "POST", "/admin/projects", None, StatusCode::CREATED).await;
    let id = created["id"].as_str().unwrap().to_owned();

    let view = expect(
      &state,
      "POST",
      "/admin/edit",
      Some(json!({
        "field": "project",
        "value": { "id": id, "edit": { "field": "title", "value": "Fresh" } },
      })),
      StatusCode::OK,
    )
    .await;
    let projects = view["document"]["projects"].as_array().unwrap();
    assert_eq!(projects.last().unwrap()["title"], "Fresh");

    expect(&state, "DELETE", &format!("/admin/projects/{id}"), None, StatusCode::NO_CONTENT).await;
    expect(&state, "DELETE", &format!("/admin/projects/{id}"), None, StatusCode::NOT_FOUND).await;
  }

  #[tokio::test]
  async fn package_add_and_delete() {
    let (_, state) = make_state(NO_RELAY);
    login(&state).await;

    let created = expect(&state, "POST", "/admin/packages", None, StatusCode::CREATED).await;
    let id = created["id"].as_str().unwrap();
    expect(&state, "DELETE", &format!("/admin/packages/{id}"), None, StatusCode::NO_CONTENT).await;
    expect(&state, "DELETE", "/admin/packages/photo-event", None, StatusCode::NO_CONTENT).await;

    let view = expect(&state, "GET", "/admin/session", None, StatusCode::OK).await;
    assert_eq!(view["document"]["packages"].as_array().unwrap().len(), 4);
  }

  #[tokio::test]
  async fn raw_mode_round_trip_and_refusal() {
    let (storage, state) = make_state(NO_RELAY);
    login(&state).await;

    let view = expect(&state, "POST", "/admin/mode", Some(json!({ "mode": "raw" })), StatusCode::OK).await;
    assert_eq!(view["state"], "raw");
    let text = view["raw"].as_str().unwrap().replace("BIGBOY PRODUCTIONS", "RAW STUDIO");

    expect(&state, "PUT", "/admin/raw", Some(json!({ "text": "{ broken" })), StatusCode::OK).await;
    let failed = expect(
      &state,
      "POST",
      "/admin/mode",
      Some(json!({ "mode": "structured" })),
      StatusCode::UNPROCESSABLE_ENTITY,
    )
    .await;
    assert!(failed["error"].is_string());
    let view = expect(&state, "GET", "/admin/session", None, StatusCode::OK).await;
    assert_eq!(view["state"], "raw");
    assert_eq!(view["raw"], "{ broken");

    expect(&state, "POST", "/admin/commit", None, StatusCode::UNPROCESSABLE_ENTITY).await;
    assert!(storage.is_empty());

    expect(&state, "PUT", "/admin/raw", Some(json!({ "text": text })), StatusCode::OK).await;
    let view = expect(
      &state,
      "POST",
      "/admin/mode",
      Some(json!({ "mode": "structured" })),
      StatusCode::OK,
    )
    .await;
    assert_eq!(view["document"]["branding"]["name"], "RAW STUDIO");
  }

  #[tokio::test]
  async fn raw_text_requires_raw_mode() {
    let (_, state) = make_state(NO_RELAY);
    login(&state).await;
    expect(&state, "PUT", "/admin/raw", Some(json!({ "text": "{}" })), StatusCode::CONFLICT).await;
  }

  #[tokio::test]
  async fn exit_discards_edits() {
    let (storage, state) = make_state(NO_RELAY);
    login(&state).await;
    expect(
      &state,
      "POST",
      "/admin/edit",
      Some(json!({ "field": "branding_name", "value": "Gone" })),
      StatusCode::OK,
    )
    .await;
    expect(&state, "POST", "/admin/exit", None, StatusCode::NO_CONTENT).await;

    let view = expect(&state, "GET", "/admin/session", None, StatusCode::OK).await;
    assert_eq!(view["state"], "logged_out");
    assert!(view.get("document").is_none());
    let public = expect(&state, "GET", "/content", None, StatusCode::OK).await;
    assert_eq!(public["branding"]["name"], "BIGBOY PRODUCTIONS");
    assert!(storage.is_empty());
  }
}
