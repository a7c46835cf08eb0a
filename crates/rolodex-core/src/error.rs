//! Error types for `rolodex-core`.

use thiserror::Error;

use crate::{
  contact::{ContactId, UniqueField},
  validate::Violations,
};

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid contact: {0}")]
  Invalid(Violations),

  #[error("contact not found with id {0}")]
  NotFound(ContactId),

  #[error("a contact with this {} already exists", conflict_noun(.0))]
  Conflict(UniqueField),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<Violations> for Error {
  fn from(v: Violations) -> Self { Error::Invalid(v) }
}

fn conflict_noun(field: &UniqueField) -> &'static str {
  match field {
    UniqueField::Email => "email",
    UniqueField::Phone => "phone number",
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn messages() {
    assert_eq!(
      Error::Conflict(UniqueField::Phone).to_string(),
      "a contact with this phone number already exists"
    );
    assert_eq!(Error::NotFound(42).to_string(), "contact not found with id 42");
  }
}
