//! API error type, the JSON error body, and the middleware that stamps the
//! request path onto it.

use axum::{
  Json,
  extract::{
    OriginalUri, Request,
    rejection::{JsonRejection, PathRejection, QueryRejection},
  },
  http::StatusCode,
  middleware::Next,
  response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rolodex_core::validate::Violations;
use serde::Serialize;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Core(#[from] rolodex_core::Error),

  /// Malformed JSON body, path segment, or query string.
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("no route for this path")]
  NoRoute,
}

impl From<JsonRejection> for ApiError {
  fn from(r: JsonRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

impl From<PathRejection> for ApiError {
  fn from(r: PathRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(r: QueryRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
  pub timestamp: DateTime<Utc>,
  pub status:    u16,
  /// HTTP reason phrase, e.g. `"Conflict"`.
  pub error:     String,
  pub message:   String,
  /// Filled in by [`attach_path`]; empty if that layer is absent.
  pub path:      String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub errors:    Option<Violations>,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    use rolodex_core::Error as Core;

    let (status, message, errors) = match self {
      ApiError::Core(Core::Invalid(v)) => (
        StatusCode::BAD_REQUEST,
        "the submitted contact is invalid".to_owned(),
        Some(v),
      ),
      ApiError::Core(e @ Core::NotFound(_)) => (StatusCode::NOT_FOUND, e.to_string(), None),
      ApiError::Core(e @ Core::Conflict(_)) => (StatusCode::CONFLICT, e.to_string(), None),
      ApiError::Core(Core::Store(e)) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), None)
      }
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m, None),
      e @ ApiError::NoRoute => (StatusCode::NOT_FOUND, e.to_string(), None),
    };

    let body = ErrorBody {
      timestamp: Utc::now(),
      status: status.as_u16(),
      error: status.canonical_reason().unwrap_or("Error").to_owned(),
      message,
      path: String::new(),
      errors,
    };

    let mut res = (status, Json(body.clone())).into_response();
    res.extensions_mut().insert(body);
    res
  }
}

/// Re-render error responses with the path of the request that caused them.
pub async fn attach_path(req: Request, next: Next) -> Response {
  let path = match req.extensions().get::<OriginalUri>() {
    Some(OriginalUri(uri)) => uri.path().to_owned(),
    None => req.uri().path().to_owned(),
  };

  let mut res = next.run(req).await;
  match res.extensions_mut().remove::<ErrorBody>() {
    Some(body) => (res.status(), Json(ErrorBody { path, ..body })).into_response(),
    None => res,
  }
}
