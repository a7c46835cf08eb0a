//! Handlers for `/contacts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/contacts` | All contacts, by id |
//! | `GET`    | `/contacts/{id}` | 404 if not found |
//! | `POST`   | `/contacts` | Body: [`ContactPayload`]; returns 201 + stored contact |
//! | `PUT`    | `/contacts/{id}` | Body: [`ContactPayload`]; full replacement |
//! | `DELETE` | `/contacts/{id}` | Returns `{"message": ...}` |
//! | `GET`    | `/contacts/search?name=` | Case-insensitive name substring |
//! | `GET`    | `/contacts/city?city=` | Exact city match |

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, PathRejection, QueryRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use rolodex_core::{
  contact::{Contact, ContactId, ContactPayload},
  store::ContactStore,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /contacts`
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore,
{
  Ok(Json(state.service.list_all().await?))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /contacts/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  id: Result<Path<ContactId>, PathRejection>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
{
  let Path(id) = id?;
  Ok(Json(state.service.get(id).await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contacts` — returns 201 + the stored [`Contact`].
pub async fn create<S>(
  State(state): State<AppState<S>>,
  body: Result<Json<ContactPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore,
{
  let Json(payload) = body?;
  let input = state.rules.validate(payload).map_err(rolodex_core::Error::from)?;
  let contact = state.service.create(input).await?;
  Ok((StatusCode::CREATED, Json(contact)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /contacts/{id}` — every mutable field is replaced.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  id: Result<Path<ContactId>, PathRejection>,
  body: Result<Json<ContactPayload>, JsonRejection>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
{
  let Path(id) = id?;
  let Json(payload) = body?;
  let input = state.rules.validate(payload).map_err(rolodex_core::Error::from)?;
  Ok(Json(state.service.update(id, input).await?))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// Acknowledgement returned by `DELETE /contacts/{id}`.
#[derive(Debug, Serialize)]
pub struct Deleted {
  pub message: String,
}

/// `DELETE /contacts/{id}`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  id: Result<Path<ContactId>, PathRejection>,
) -> Result<Json<Deleted>, ApiError>
where
  S: ContactStore,
{
  let Path(id) = id?;
  state.service.delete(id).await?;
  Ok(Json(Deleted { message: "contact deleted".to_owned() }))
}

// ─── Filters ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchParams {
  pub name: String,
}

/// `GET /contacts/search?name=<fragment>`
pub async fn search<S>(
  State(state): State<AppState<S>>,
  params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore,
{
  let Query(params) = params?;
  Ok(Json(state.service.search(&params.name).await?))
}

#[derive(Debug, Deserialize)]
pub struct CityParams {
  pub city: String,
}

/// `GET /contacts/city?city=<city>`
pub async fn by_city<S>(
  State(state): State<AppState<S>>,
  params: Result<Query<CityParams>, QueryRejection>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore,
{
  let Query(params) = params?;
  Ok(Json(state.service.by_city(&params.city).await?))
}
