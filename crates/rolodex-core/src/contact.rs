//! The contact record and its inbound shapes.
//!
//! A payload arrives as a [`ContactPayload`], is turned into a [`NewContact`]
//! by [`ValidationRules::validate`](crate::validate::ValidationRules::validate),
//! and comes back out of the store as a [`Contact`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Store-assigned contact identifier.
pub type ContactId = i64;

// ─── Stored record ───────────────────────────────────────────────────────────

/// A stored contact. This is also the JSON shape returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
  pub id:          ContactId,
  pub first_name:  String,
  pub last_name:   String,
  pub email:       String,
  pub phone:       String,
  pub address:     Option<String>,
  pub city:        Option<String>,
  pub postal_code: Option<String>,
  /// Set once by the store at insertion.
  pub created_at:  DateTime<Utc>,
  /// Refreshed by the store on every successful update.
  pub updated_at:  DateTime<Utc>,
}

// ─── Inbound shapes ──────────────────────────────────────────────────────────

/// An unvalidated create/update body.
///
/// Every field is optional here so that a missing or `null` field becomes a
/// per-field violation rather than a deserialisation failure. Unknown fields
/// (including a client-supplied `id`) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactPayload {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub first_name:  Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub last_name:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub email:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub phone:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub address:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub city:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub postal_code: Option<String>,
}

/// A validated set of mutable contact fields, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
  pub first_name:  String,
  pub last_name:   String,
  pub email:       String,
  pub phone:       String,
  pub address:     Option<String>,
  pub city:        Option<String>,
  pub postal_code: Option<String>,
}

impl From<Contact> for ContactPayload {
  fn from(c: Contact) -> Self {
    ContactPayload {
      first_name:  Some(c.first_name),
      last_name:   Some(c.last_name),
      email:       Some(c.email),
      phone:       Some(c.phone),
      address:     c.address,
      city:        c.city,
      postal_code: c.postal_code,
    }
  }
}

// ─── Field names ─────────────────────────────────────────────────────────────

/// A client-visible contact field, rendered with its wire name.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
  Display, AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ContactField {
  FirstName,
  LastName,
  Email,
  Phone,
  Address,
  City,
  PostalCode,
}

/// A field that must be unique across all stored contacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UniqueField {
  Email,
  Phone,
}

impl From<UniqueField> for ContactField {
  fn from(f: UniqueField) -> Self {
    match f {
      UniqueField::Email => ContactField::Email,
      UniqueField::Phone => ContactField::Phone,
    }
  }
}
