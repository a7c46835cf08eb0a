//! [`SqliteStore`] — the SQLite implementation of [`ContactStore`].

use std::path::Path;

use chrono::Utc;
use rolodex_core::{
  contact::{Contact, ContactId, NewContact},
  store::ContactStore,
};
use rusqlite::{OptionalExtension as _, functions::FunctionFlags};

use crate::{
  Result,
  encode::{RawContact, contains_pattern, encode_dt},
  schema::{COLUMNS, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Rolodex contact store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        register_functions(conn)?;
        Ok(())
      })
      .await?;
    tracing::debug!("contacts schema ready");
    Ok(())
  }

  /// Fetch at most one contact matching `condition` (a `WHERE` clause over a
  /// single `?1` parameter).
  async fn select_one<P>(&self, condition: &'static str, param: P) -> Result<Option<Contact>>
  where
    P: rusqlite::ToSql + Send + 'static,
  {
    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {COLUMNS} FROM contacts WHERE {condition}"),
            rusqlite::params![param],
            RawContact::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  /// Fetch every contact matching `condition`, ordered by id.
  async fn select_many(
    &self,
    condition: &'static str,
    params: Vec<String>,
  ) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(move |conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {COLUMNS} FROM contacts WHERE {condition} ORDER BY id"))?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = crate::Error;

  async fn insert(&self, input: NewContact) -> Result<Contact> {
    let now_str = encode_dt(Utc::now());

    let raw: RawContact = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          &format!(
            "INSERT INTO contacts (
               first_name, last_name, email, phone,
               address, city, postal_code, created_at, updated_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
             RETURNING {COLUMNS}"
          ),
          rusqlite::params![
            input.first_name,
            input.last_name,
            input.email,
            input.phone,
            input.address,
            input.city,
            input.postal_code,
            now_str,
          ],
          RawContact::from_row,
        )?)
      })
      .await?;

    raw.into_contact()
  }

  async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>> {
    self.select_one("id = ?1", id).await
  }

  async fn find_by_email(&self, email: &str) -> Result<Option<Contact>> {
    self.select_one("email = ?1", email.to_owned()).await
  }

  async fn find_by_phone(&self, phone: &str) -> Result<Option<Contact>> {
    self.select_one("phone = ?1", phone.to_owned()).await
  }

  async fn update(&self, id: ContactId, input: NewContact) -> Result<Option<Contact>> {
    let now_str = encode_dt(Utc::now());

    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "UPDATE contacts SET
                 first_name  = ?1,
                 last_name   = ?2,
                 email       = ?3,
                 phone       = ?4,
                 address     = ?5,
                 city        = ?6,
                 postal_code = ?7,
                 updated_at  = max(?8, created_at)
               WHERE id = ?9
               RETURNING {COLUMNS}"
            ),
            rusqlite::params![
              input.first_name,
              input.last_name,
              input.email,
              input.phone,
              input.address,
              input.city,
              input.postal_code,
              now_str,
              id,
            ],
            RawContact::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn delete(&self, id: ContactId) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM contacts WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;
    Ok(removed > 0)
  }

  async fn find_all(&self) -> Result<Vec<Contact>> {
    self.select_many("1 = 1", vec![]).await
  }

  async fn find_by_city(&self, city: &str) -> Result<Vec<Contact>> {
    self.select_many("city = ?1", vec![city.to_owned()]).await
  }

  async fn search_by_name(&self, fragment: &str) -> Result<Vec<Contact>> {
    // Built-in LIKE folds ASCII case only, so both sides go through
    // `unicode_lower` first.
    self
      .select_many(
        "unicode_lower(first_name) LIKE ?1 ESCAPE '\\' \
         OR unicode_lower(last_name) LIKE ?1 ESCAPE '\\'",
        vec![contains_pattern(&fragment.to_lowercase())],
      )
      .await
  }
}

// ─── SQL functions ───────────────────────────────────────────────────────────

/// Register `unicode_lower(text)`, a full Unicode lowercase. Functions live on
/// the connection, so this runs on every open.
fn register_functions(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
  conn.create_scalar_function(
    "unicode_lower",
    1,
    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
    |ctx| Ok(ctx.get::<String>(0)?.to_lowercase()),
  )
}
