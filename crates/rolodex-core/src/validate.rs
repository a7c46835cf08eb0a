//! Structural validation of inbound contact payloads.
//!
//! Values are trimmed before any pattern is checked, so `" 1234567 "` is a
//! valid phone and is stored as `"1234567"`. Whitespace inside a value is
//! still checked by the pattern.

use std::{collections::BTreeMap, fmt, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::contact::{ContactField, ContactPayload, NewContact};

// Same shape as the HTML `input[type=email]` check.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
  )
  .expect("email pattern is valid")
});

static PHONE_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[+]?[0-9]{7,15}$").expect("phone pattern is valid"));

static POSTAL_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(?:[0-9]{5}|[A-Z]{2}[0-9]{3})$").expect("postal code pattern is valid")
});

// ─── Violations ──────────────────────────────────────────────────────────────

/// Field name → human-readable message, one entry per offending field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Violations(BTreeMap<ContactField, String>);

impl Violations {
  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn get(&self, field: ContactField) -> Option<&str> {
    self.0.get(&field).map(String::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = (ContactField, &str)> {
    self.0.iter().map(|(f, m)| (*f, m.as_str()))
  }

  /// Records a violation. The first message for a field wins.
  fn push(&mut self, field: ContactField, message: &str) {
    self.0.entry(field).or_insert_with(|| message.to_owned());
  }
}

impl fmt::Display for Violations {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut first = true;
    for (field, message) in self.iter() {
      if !first {
        f.write_str("; ")?;
      }
      write!(f, "{field}: {message}")?;
      first = false;
    }
    Ok(())
  }
}

// ─── Rules ───────────────────────────────────────────────────────────────────

/// Tunable validation rules.
///
/// `enforce_postal_code` controls whether a supplied postal code must be
/// five digits or two uppercase letters followed by three digits. Whether
/// that check belongs at the wire layer is still an open product question,
/// hence the switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRules {
  pub enforce_postal_code: bool,
}

impl Default for ValidationRules {
  fn default() -> Self { Self { enforce_postal_code: true } }
}

impl ValidationRules {
  /// Check `payload` and return the normalised fields, or every violation
  /// found.
  ///
  /// Required fields are trimmed before their patterns run. Optional fields
  /// are trimmed and dropped when blank.
  pub fn validate(&self, payload: ContactPayload) -> Result<NewContact, Violations> {
    let mut violations = Violations::default();

    let first_name = required(payload.first_name);
    if first_name.is_empty() {
      violations.push(ContactField::FirstName, "first name is required");
    }

    let last_name = required(payload.last_name);
    if last_name.is_empty() {
      violations.push(ContactField::LastName, "last name is required");
    }

    let email = required(payload.email);
    if email.is_empty() {
      violations.push(ContactField::Email, "email is required");
    } else if !EMAIL_RE.is_match(&email) {
      violations.push(ContactField::Email, "email must be a valid address");
    }

    let phone = required(payload.phone);
    if phone.is_empty() {
      violations.push(ContactField::Phone, "phone is required");
    } else if !PHONE_RE.is_match(&phone) {
      violations.push(
        ContactField::Phone,
        "phone must contain 7 to 15 digits, optionally prefixed with +",
      );
    }

    let postal_code = optional(payload.postal_code);
    if self.enforce_postal_code
      && let Some(code) = &postal_code
      && !POSTAL_CODE_RE.is_match(code)
    {
      violations.push(
        ContactField::PostalCode,
        "postal code must be 5 digits or 2 uppercase letters followed by 3 digits",
      );
    }

    if !violations.is_empty() {
      return Err(violations);
    }

    Ok(NewContact {
      first_name,
      last_name,
      email,
      phone,
      address: optional(payload.address),
      city: optional(payload.city),
      postal_code,
    })
  }
}

fn required(value: Option<String>) -> String {
  value.map(|v| v.trim().to_owned()).unwrap_or_default()
}

fn optional(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_owned())
    .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ada() -> ContactPayload {
    ContactPayload {
      first_name: Some("Ada".into()),
      last_name: Some("Lovelace".into()),
      email: Some("ada@x.com".into()),
      phone: Some("+33123456789".into()),
      ..Default::default()
    }
  }

  #[test]
  fn valid_payload_passes() {
    let c = ValidationRules::default().validate(ada()).unwrap();
    assert_eq!(c.first_name, "Ada");
    assert_eq!(c.phone, "+33123456789");
    assert!(c.city.is_none());
  }

  #[test]
  fn collects_every_violation() {
    let payload = ContactPayload {
      first_name: Some("   ".into()),
      phone: Some("abc".into()),
      ..ada()
    };
    let v = ValidationRules::default().validate(payload).unwrap_err();
    assert_eq!(v.len(), 2);
    assert_eq!(v.get(ContactField::FirstName), Some("first name is required"));
    assert!(v.get(ContactField::Phone).unwrap().contains("7 to 15 digits"));
  }

  #[test]
  fn empty_payload_reports_all_required_fields() {
    let v = ValidationRules::default()
      .validate(ContactPayload::default())
      .unwrap_err();
    let fields: Vec<_> = v.iter().map(|(f, _)| f).collect();
    assert_eq!(fields, vec![
      ContactField::FirstName,
      ContactField::LastName,
      ContactField::Email,
      ContactField::Phone,
    ]);
  }

  #[test]
  fn email_shape() {
    let rules = ValidationRules::default();
    for bad in ["not-an-email", "a@", "@x.com", "a b@x.com", "a@-x.com"] {
      let p = ContactPayload { email: Some(bad.into()), ..ada() };
      assert!(rules.validate(p).is_err(), "{bad} should be rejected");
    }
    for good in ["a@b", "first.last+tag@sub.example.org"] {
      let p = ContactPayload { email: Some(good.into()), ..ada() };
      assert!(rules.validate(p).is_ok(), "{good} should be accepted");
    }
  }

  #[test]
  fn phone_bounds() {
    let rules = ValidationRules::default();
    for bad in ["123456", "1234567890123456", "++1234567", "12-34-567"] {
      let p = ContactPayload { phone: Some(bad.into()), ..ada() };
      assert!(rules.validate(p).is_err(), "{bad} should be rejected");
    }
    for good in ["1234567", "+123456789012345"] {
      let p = ContactPayload { phone: Some(good.into()), ..ada() };
      assert!(rules.validate(p).is_ok(), "{good} should be accepted");
    }
  }

  #[test]
  fn patterns_apply_to_trimmed_values() {
    let p = ContactPayload {
      email: Some(" ada@x.com\t".into()),
      phone: Some(" 1234567 ".into()),
      postal_code: Some(" 75001 ".into()),
      ..ada()
    };
    let c = ValidationRules::default().validate(p).unwrap();
    assert_eq!(c.email, "ada@x.com");
    assert_eq!(c.phone, "1234567");
    assert_eq!(c.postal_code.as_deref(), Some("75001"));

    let inner = ContactPayload { phone: Some("123 4567".into()), ..ada() };
    let v = ValidationRules::default().validate(inner).unwrap_err();
    assert!(v.get(ContactField::Phone).is_some());
  }

  #[test]
  fn postal_code_rule_is_switchable() {
    let p = ContactPayload { postal_code: Some("7500".into()), ..ada() };

    let strict = ValidationRules { enforce_postal_code: true };
    let v = strict.validate(p.clone()).unwrap_err();
    assert!(v.get(ContactField::PostalCode).is_some());

    let lax = ValidationRules { enforce_postal_code: false };
    assert_eq!(lax.validate(p).unwrap().postal_code.as_deref(), Some("7500"));

    for good in ["75001", "AB123"] {
      let p = ContactPayload { postal_code: Some(good.into()), ..ada() };
      assert!(strict.validate(p).is_ok());
    }
  }

  #[test]
  fn blank_optionals_become_absent() {
    let p = ContactPayload {
      address: Some("".into()),
      city: Some("  Paris ".into()),
      postal_code: Some(" ".into()),
      ..ada()
    };
    let c = ValidationRules::default().validate(p).unwrap();
    assert!(c.address.is_none());
    assert_eq!(c.city.as_deref(), Some("Paris"));
    assert!(c.postal_code.is_none());
  }

  #[test]
  fn violations_serialise_as_field_map() {
    let v = ValidationRules::default()
      .validate(ContactPayload { last_name: None, ..ada() })
      .unwrap_err();
    let json = serde_json::to_value(&v).unwrap();
    assert_eq!(json, serde_json::json!({ "lastName": "last name is required" }));
  }
}
