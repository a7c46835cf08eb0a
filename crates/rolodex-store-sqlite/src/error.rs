//! Error type for `rolodex-store-sqlite`.

use rolodex_core::{contact::UniqueField, store::StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A write collided with the `UNIQUE` constraint on `field`.
  #[error("duplicate {0}")]
  Duplicate(UniqueField),
}

impl From<tokio_rusqlite::Error> for Error {
  fn from(e: tokio_rusqlite::Error) -> Self {
    match unique_column(&e) {
      Some(field) => Error::Duplicate(field),
      None => Error::Database(e),
    }
  }
}

/// Recognise SQLite's `UNIQUE constraint failed: contacts.<column>` failure.
fn unique_column(e: &tokio_rusqlite::Error) -> Option<UniqueField> {
  let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(err, Some(msg))) = e else {
    return None;
  };
  if err.code != rusqlite::ErrorCode::ConstraintViolation {
    return None;
  }
  let column = msg.strip_prefix("UNIQUE constraint failed: ")?;
  match column {
    "contacts.email" => Some(UniqueField::Email),
    "contacts.phone" => Some(UniqueField::Phone),
    _ => None,
  }
}

impl StoreError for Error {
  fn unique_violation(&self) -> Option<UniqueField> {
    match self {
      Error::Duplicate(field) => Some(*field),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
