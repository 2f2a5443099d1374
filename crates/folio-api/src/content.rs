//! Public read endpoints over the active site document.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/content` | `ETag`; `If-None-Match` → 304 |
//! | `GET`  | `/content/:lang` | 404 if the language is not configured |
//! | `GET`  | `/languages` | Active and available language codes |
//! | `PUT`  | `/language` | Body: `{"language":"nl"}` |
//! | `GET`  | `/gallery` | `?filter=all\|photography\|cinematography&preview=true` |
//! | `GET`  | `/packages` | Optional `?category=Photography\|Videography\|Combo` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::{HeaderMap, HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use folio_core::{
  document::{GalleryEntry, PackageCategory, ServicePackage, SiteDocument},
  filter::{WorkFilter, filter_gallery, packages_in},
  language::Language,
  storage::DocumentStorage,
};
use serde::{Deserialize, Serialize};

use crate::{
  AppState,
  error::ApiError,
  etag::{compute_etag, if_none_match},
};

/// A document response carrying its `ETag` and `Content-Language`.
fn document_response(
  headers: &HeaderMap,
  language: &Language,
  document: Arc<SiteDocument>,
) -> Result<Response, ApiError> {
  let etag = compute_etag(&document)?;
  let etag_value = HeaderValue::from_str(&etag)
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let language_value = HeaderValue::from_str(language.as_str())
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let not_modified = headers
    .get(header::IF_NONE_MATCH)
    .and_then(|v| v.to_str().ok())
    .is_some_and(|v| if_none_match(v, &etag));

  let mut resp = if not_modified {
    StatusCode::NOT_MODIFIED.into_response()
  } else {
    Json(document.as_ref()).into_response()
  };
  resp.headers_mut().insert(header::ETAG, etag_value);
  resp.headers_mut().insert(header::CONTENT_LANGUAGE, language_value);
  Ok(resp)
}

// ─── Documents ────────────────────────────────────────────────────────────────

/// `GET /content`
pub async fn active<S: DocumentStorage>(
  State(state): State<AppState<S>>,
  headers: HeaderMap,
) -> Result<Response, ApiError> {
  let language = state.store.active_language();
  document_response(&headers, &language, state.store.active())
}

/// `GET /content/:lang`
pub async fn for_language<S: DocumentStorage>(
  State(state): State<AppState<S>>,
  Path(lang): Path<String>,
  headers: HeaderMap,
) -> Result<Response, ApiError> {
  let language = Language::parse(&lang)?;
  let document = state.store.document(&language)?;
  document_response(&headers, &language, document)
}

// ─── Language ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct LanguagesView {
  pub active:    Language,
  pub available: Vec<Language>,
}

/// `GET /languages`
pub async fn languages<S: DocumentStorage>(
  State(state): State<AppState<S>>,
) -> Json<LanguagesView> {
  Json(LanguagesView {
    active:    state.store.active_language(),
    available: state.store.languages(),
  })
}

#[derive(Debug, Deserialize)]
pub struct LanguageBody {
  pub language: String,
}

/// `PUT /language` with body `{"language":"nl"}`
pub async fn set_language<S: DocumentStorage>(
  State(state): State<AppState<S>>,
  Json(body): Json<LanguageBody>,
) -> Result<Json<LanguagesView>, ApiError> {
  let active = state.store.set_language(&body.language)?;
  Ok(Json(LanguagesView { active, available: state.store.languages() }))
}

// ─── Gallery & packages ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct GalleryParams {
  #[serde(default)]
  pub filter:  WorkFilter,
  #[serde(default)]
  pub preview: bool,
}

/// `GET /gallery[?filter=<label>][&preview=true]`
pub async fn gallery<S: DocumentStorage>(
  State(state): State<AppState<S>>,
  Query(params): Query<GalleryParams>,
) -> Json<Vec<GalleryEntry>> {
  let document = state.store.active();
  Json(
    filter_gallery(&document.projects, params.filter, params.preview)
      .into_iter()
      .cloned()
      .collect(),
  )
}

#[derive(Debug, Deserialize, Default)]
pub struct PackageParams {
  pub category: Option<PackageCategory>,
}

/// `GET /packages[?category=<category>]`
pub async fn packages<S: DocumentStorage>(
  State(state): State<AppState<S>>,
  Query(params): Query<PackageParams>,
) -> Json<Vec<ServicePackage>> {
  let document = state.store.active();
  let packages = match params.category {
    Some(category) => packages_in(&document.packages, category)
      .into_iter()
      .cloned()
      .collect(),
    None => document.packages.clone(),
  };
  Json(packages)
}

#[cfg(test)]
mod tests {
  use axum::http::{Request, StatusCode, header};
  use serde_json::json;
  use tower::ServiceExt as _;

  use crate::{router, test_support::*};

  #[tokio::test]
  async fn content_carries_etag_and_honours_if_none_match() {
    let (_, state) = make_state("http://127.0.0.1:1");
    let resp = send(&state, "GET", "/content", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_LANGUAGE], "en");
    let etag = resp.headers()[header::ETAG].to_str().unwrap().to_owned();
    let body = json(resp).await;
    assert_eq!(body["branding"]["name"], "BIGBOY PRODUCTIONS");
    assert_eq!(body["schemaVersion"], 2);

    let req = Request::builder()
      .uri("/content")
      .header(header::IF_NONE_MATCH, &etag)
      .body(axum::body::Body::empty())
      .unwrap();
    let resp = router(state.clone()).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(resp.headers()[header::ETAG], etag.as_str());
  }

  #[tokio::test]
  async fn language_switch_changes_active_content() {
    let (_, state) = make_state("http://127.0.0.1:1");
    let view = expect(&state, "PUT", "/language", Some(json!({ "language": "NL" })), StatusCode::OK).await;
    assert_eq!(view["active"], "nl");
    assert_eq!(view["available"], json!(["en", "nl"]));

    let body = expect(&state, "GET", "/content", None, StatusCode::OK).await;
    assert_eq!(body["labels"]["nav.work"], "Werk");
  }

  #[tokio::test]
  async fn unknown_and_invalid_languages() {
    let (_, state) = make_state("http://127.0.0.1:1");
    expect(&state, "PUT", "/language", Some(json!({ "language": "fr" })), StatusCode::NOT_FOUND).await;
    expect(&state, "GET", "/content/fr", None, StatusCode::NOT_FOUND).await;
    expect(&state, "GET", "/content/1x", None, StatusCode::BAD_REQUEST).await;

    let body = expect(&state, "GET", "/content/nl", None, StatusCode::OK).await;
    assert_eq!(body["labels"]["nav.services"], "Diensten");
  }

  #[tokio::test]
  async fn gallery_filters_and_preview() {
    let (_, state) = make_state("http://127.0.0.1:1");
    let all = expect(&state, "GET", "/gallery", None, StatusCode::OK).await;
    assert_eq!(all.as_array().unwrap().len(), 9);

    let motion = expect(&state, "GET", "/gallery?filter=cinematography", None, StatusCode::OK).await;
    assert_eq!(motion.as_array().unwrap().len(), 4);

    let preview = expect(&state, "GET", "/gallery?preview=true", None, StatusCode::OK).await;
    assert_eq!(preview.as_array().unwrap().len(), 4);
    assert_eq!(preview[0]["id"], "vid-1");
  }

  #[tokio::test]
  async fn packages_by_category() {
    let (_, state) = make_state("http://127.0.0.1:1");
    let all = expect(&state, "GET", "/packages", None, StatusCode::OK).await;
    assert_eq!(all.as_array().unwrap().len(), 5);

    let video = expect(&state, "GET", "/packages?category=Videography", None, StatusCode::OK).await;
    assert_eq!(video.as_array().unwrap().len(), 2);
  }
}
