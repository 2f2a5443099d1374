//! JSON HTTP API for the Folio studio site.
//!
//! Exposes an axum [`Router`] backed by a [`ContentStore`] over any
//! [`DocumentStorage`]. Public routes read the active document; `/admin`
//! routes drive the single [`EditorSession`]; `/inquiries` relays the contact
//! form. TLS and real authentication are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = folio_api::router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod admin;
pub mod content;
pub mod error;
pub mod etag;
pub mod inquiries;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post, put},
};
use folio_core::{editor::EditorSession, storage::DocumentStorage, store::ContentStore};
use folio_remote::InquiryRelay;
use serde::Deserialize;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// How contact-form submissions are completed before relaying.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InquirySettings {
  /// Subject used when the visitor leaves it empty.
  pub fallback_subject: String,
  /// Relay-side rendering template.
  pub template:         String,
  /// Salutation that pre-filled messages open with.
  pub greeting:         String,
}

impl Default for InquirySettings {
  fn default() -> Self {
    Self {
      fallback_subject: "New Inquiry from BigBoy Productions Site".to_owned(),
      template:         "table".to_owned(),
      greeting:         "Hi Liam".to_owned(),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub store:     Arc<ContentStore<S>>,
  /// The one admin session. Held across the commit's storage write, so an
  /// async mutex.
  pub session:   Arc<Mutex<EditorSession>>,
  pub relay:     Arc<InquiryRelay>,
  pub inquiries: Arc<InquirySettings>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:     self.store.clone(),
      session:   self.session.clone(),
      relay:     self.relay.clone(),
      inquiries: self.inquiries.clone(),
    }
  }
}

impl<S: DocumentStorage> AppState<S> {
  pub fn new(
    store: Arc<ContentStore<S>>,
    session: EditorSession,
    relay: InquiryRelay,
    inquiries: InquirySettings,
  ) -> Self {
    Self {
      store,
      session: Arc::new(Mutex::new(session)),
      relay: Arc::new(relay),
      inquiries: Arc::new(inquiries),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the fully-materialised API router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: DocumentStorage + 'static,
{
  Router::new()
    // Public content
    .route("/content", get(content::active::<S>))
    .route("/content/{lang}", get(content::for_language::<S>))
    .route("/languages", get(content::languages::<S>))
    .route("/language", put(content::set_language::<S>))
    .route("/gallery", get(content::gallery::<S>))
    .route("/packages", get(content::packages::<S>))
    // Inquiries
    .route("/inquiries", post(inquiries::submit::<S>))
    .route("/inquiries/draft", post(inquiries::draft::<S>))
    // Admin
    .route("/admin/login", post(admin::login::<S>))
    .route("/admin/session", get(admin::session::<S>))
    .route("/admin/mode", post(admin::mode::<S>))
    .route("/admin/edit", post(admin::edit::<S>))
    .route("/admin/raw", put(admin::raw::<S>))
    .route("/admin/projects", post(admin::add_project::<S>))
    .route("/admin/projects/{id}", delete(admin::delete_project::<S>))
    .route("/admin/packages", post(admin::add_package::<S>))
    .route("/admin/packages/{id}", delete(admin::delete_package::<S>))
    .route("/admin/commit", post(admin::commit::<S>))
    .route("/admin/exit", post(admin::exit::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod test_support {
  use axum::{
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode},
  };
  use folio_core::{
    defaults::DEFAULT_STORAGE_KEY,
    editor::AccessGate,
    storage::MemoryStorage,
  };
  use serde_json::Value;
  use tower::ServiceExt as _;

  use super::*;

  pub fn make_state(relay_endpoint: &str) -> (MemoryStorage, AppState<MemoryStorage>) {
    let storage = MemoryStorage::new();
    let store = Arc::new(ContentStore::with_builtin_content(
      storage.clone(),
      DEFAULT_STORAGE_KEY,
    ));
    let state = AppState::new(
      store,
      EditorSession::new(AccessGate::default()),
      InquiryRelay::new(relay_endpoint).unwrap(),
      InquirySettings::default(),
    );
    (storage, state)
  }

  pub async fn send(
    state: &AppState<MemoryStorage>,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
      Some(json) => builder
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    router(state.clone()).oneshot(req).await.unwrap()
  }

  pub async fn json(resp: Response<Body>) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  pub async fn expect(
    state: &AppState<MemoryStorage>,
    method: &str,
    uri: &str,
    body: Option<Value>,
    status: StatusCode,
  ) -> Value {
    let resp = send(state, method, uri, body).await;
    assert_eq!(resp.status(), status, "{method} {uri}");
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    }
  }
}
