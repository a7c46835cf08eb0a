//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 UTC strings with a fixed microsecond
//! precision, so lexical order in SQL matches chronological order.

use chrono::{DateTime, SecondsFormat, Utc};
use rolodex_core::contact::{Contact, ContactId};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── LIKE patterns ───────────────────────────────────────────────────────────

/// Build a `LIKE … ESCAPE '\'` pattern matching `fragment` as a literal
/// substring.
pub fn contains_pattern(fragment: &str) -> String {
  let mut pattern = String::with_capacity(fragment.len() + 2);
  pattern.push('%');
  for ch in fragment.chars() {
    if matches!(ch, '%' | '_' | '\\') {
      pattern.push('\\');
    }
    pattern.push(ch);
  }
  pattern.push('%');
  pattern
}

// ─── Raw row type ────────────────────────────────────────────────────────────

/// A `contacts` row as read from SQLite, before timestamp parsing.
pub struct RawContact {
  pub id:          ContactId,
  pub first_name:  String,
  pub last_name:   String,
  pub email:       String,
  pub phone:       String,
  pub address:     Option<String>,
  pub city:        Option<String>,
  pub postal_code: Option<String>,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawContact {
  /// Read a row selected with [`COLUMNS`](crate::schema::COLUMNS).
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawContact {
      id:          row.get(0)?,
      first_name:  row.get(1)?,
      last_name:   row.get(2)?,
      email:       row.get(3)?,
      phone:       row.get(4)?,
      address:     row.get(5)?,
      city:        row.get(6)?,
      postal_code: row.get(7)?,
      created_at:  row.get(8)?,
      updated_at:  row.get(9)?,
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:          self.id,
      first_name:  self.first_name,
      last_name:   self.last_name,
      email:       self.email,
      phone:       self.phone,
      address:     self.address,
      city:        self.city,
      postal_code: self.postal_code,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}
