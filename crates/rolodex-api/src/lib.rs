//! JSON REST API for Rolodex.
//!
//! Exposes an axum [`Router`] backed by any
//! [`ContactStore`](rolodex_core::store::ContactStore), plus the
//! [`ServerConfig`] read by the `server` binary.

pub mod contacts;
pub mod error;

use std::path::PathBuf;

use axum::{
  Router, middleware,
  routing::get,
};
use rolodex_core::{service::ContactService, store::ContactStore, validate::ValidationRules};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ROLODEX_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                String,
  pub port:                u16,
  pub store_path:          PathBuf,
  /// Require postal codes to be 5 digits or 2 uppercase letters + 3 digits.
  pub enforce_postal_code: bool,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                "127.0.0.1".to_string(),
      port:                8080,
      store_path:          PathBuf::from("rolodex.db"),
      enforce_postal_code: ValidationRules::default().enforce_postal_code,
    }
  }
}

impl ServerConfig {
  pub fn validation_rules(&self) -> ValidationRules {
    ValidationRules { enforce_postal_code: self.enforce_postal_code }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub service: ContactService<S>,
  pub rules:   ValidationRules,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self { service: self.service.clone(), rules: self.rules }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the `/contacts` router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: ContactStore + 'static,
{
  Router::new()
    .route("/contacts", get(contacts::list::<S>).post(contacts::create::<S>))
    .route("/contacts/search", get(contacts::search::<S>))
    .route("/contacts/city", get(contacts::by_city::<S>))
    .route(
      "/contacts/{id}",
      get(contacts::get_one::<S>)
        .put(contacts::update::<S>)
        .delete(contacts::delete::<S>),
    )
    .fallback(no_route)
    .layer(middleware::from_fn(error::attach_path))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

async fn no_route() -> ApiError { ApiError::NoRoute }

// ─── Integration tests ────────────────────────────────────────────────────────
