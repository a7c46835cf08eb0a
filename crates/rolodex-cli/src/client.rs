//! Async HTTP client wrapping the rolodex JSON API.

use std::{collections::BTreeMap, fmt, time::Duration};

use anyhow::{Context, Result};
use reqwest::{Client, Response};
use rolodex_core::contact::{Contact, ContactId, ContactPayload};
use serde::{Deserialize, de::DeserializeOwned};

/// Error body returned by the server for any non-2xx response.
#[derive(Debug, Deserialize)]
pub struct ServerError {
  pub status:  u16,
  #[serde(default)]
  pub message: String,
  #[serde(default)]
  pub errors:  BTreeMap<String, String>,
}

impl fmt::Display for ServerError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.status, self.message)?;
    for (field, message) in &self.errors {
      write!(f, "\n  {field}: {message}")?;
    }
    Ok(())
  }
}

impl std::error::Error for ServerError {}

/// Async HTTP client for the rolodex REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client:   Client,
  base_url: String,
}

impl ApiClient {
  pub fn new(base_url: impl Into<String>) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, base_url: base_url.into() })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/contacts{}", self.base_url.trim_end_matches('/'), path)
  }

  /// `GET /contacts`
  pub async fn list(&self) -> Result<Vec<Contact>> {
    let resp = self.client.get(self.url("")).send().await.context("GET /contacts failed")?;
    decode(resp).await
  }

  /// `GET /contacts/{id}`
  pub async fn get(&self, id: ContactId) -> Result<Contact> {
    let resp = self
      .client
      .get(self.url(&format!("/{id}")))
      .send()
      .await
      .with_context(|| format!("GET /contacts/{id} failed"))?;
    decode(resp).await
  }

  /// `POST /contacts`
  pub async fn create(&self, payload: &ContactPayload) -> Result<Contact> {
    let resp = self
      .client
      .post(self.url(""))
      .json(payload)
      .send()
      .await
      .context("POST /contacts failed")?;
    decode(resp).await
  }

  /// `PUT /contacts/{id}`
  pub async fn update(&self, id: ContactId, payload: &ContactPayload) -> Result<Contact> {
    let resp = self
      .client
      .put(self.url(&format!("/{id}")))
      .json(payload)
      .send()
      .await
      .with_context(|| format!("PUT /contacts/{id} failed"))?;
    decode(resp).await
  }

  /// `DELETE /contacts/{id}`; returns the server's acknowledgement message.
  pub async fn delete(&self, id: ContactId) -> Result<String> {
    #[derive(Deserialize)]
    struct Deleted {
      message: String,
    }

    let resp = self
      .client
      .delete(self.url(&format!("/{id}")))
      .send()
      .await
      .with_context(|| format!("DELETE /contacts/{id} failed"))?;
    let deleted: Deleted = decode(resp).await?;
    Ok(deleted.message)
  }

  /// `GET /contacts/search?name=<fragment>`
  pub async fn search(&self, name: &str) -> Result<Vec<Contact>> {
    let resp = self
      .client
      .get(self.url("/search"))
      .query(&[("name", name)])
      .send()
      .await
      .context("GET /contacts/search failed")?;
    decode(resp).await
  }

  /// `GET /contacts/city?city=<city>`
  pub async fn by_city(&self, city: &str) -> Result<Vec<Contact>> {
    let resp = self
      .client
      .get(self.url("/city"))
      .query(&[("city", city)])
      .send()
      .await
      .context("GET /contacts/city failed")?;
    decode(resp).await
  }
}

/// Deserialise a success body, or turn the server's error body into an error.
async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
  let status = resp.status();
  tracing::debug!(url = %resp.url(), %status, "response received");
  if status.is_success() {
    return resp.json().await.context("deserialising response body");
  }

  let text = resp.text().await.unwrap_or_default();
  let err = serde_json::from_str::<ServerError>(&text).unwrap_or_else(|_| ServerError {
    status:  status.as_u16(),
    message: text,
    errors:  BTreeMap::new(),
  });
  tracing::debug!(%err, "server rejected request");
  Err(err.into())
}
