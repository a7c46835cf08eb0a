//! In-memory [`ContactStore`] used by the service tests.

use std::{collections::BTreeMap, sync::Mutex};

use chrono::Utc;

use crate::{
  contact::{Contact, ContactId, NewContact, UniqueField},
  store::{ContactStore, StoreError},
};

#[derive(Debug, thiserror::Error)]
#[error("duplicate {0}")]
pub struct MemoryError(UniqueField);

impl StoreError for MemoryError {
  fn unique_violation(&self) -> Option<UniqueField> { Some(self.0) }
}

#[derive(Default)]
pub struct MemoryStore {
  rows:          Mutex<BTreeMap<ContactId, Contact>>,
  next_id:       Mutex<ContactId>,
  /// Make `find_by_email`/`find_by_phone` always miss.
  blind_lookups: bool,
}

pub fn new_contact(first: &str, last: &str, email: &str, phone: &str) -> NewContact {
  NewContact {
    first_name:  first.into(),
    last_name:   last.into(),
    email:       email.into(),
    phone:       phone.into(),
    address:     None,
    city:        None,
    postal_code: None,
  }
}

impl MemoryStore {
  /// A store whose point lookups never see existing rows, so only its write
  /// constraints catch duplicates.
  pub fn with_blind_lookups() -> Self {
    Self { blind_lookups: true, ..Default::default() }
  }

  fn check_unique(
    rows: &BTreeMap<ContactId, Contact>,
    own: Option<ContactId>,
    input: &NewContact,
  ) -> Result<(), MemoryError> {
    for c in rows.values().filter(|c| Some(c.id) != own) {
      if c.email == input.email {
        return Err(MemoryError(UniqueField::Email));
      }
      if c.phone == input.phone {
        return Err(MemoryError(UniqueField::Phone));
      }
    }
    Ok(())
  }

  fn filtered(&self, pred: impl Fn(&Contact) -> bool) -> Vec<Contact> {
    let rows = self.rows.lock().unwrap();
    rows.values().filter(|c| pred(c)).cloned().collect()
  }
}

impl ContactStore for MemoryStore {
  type Error = MemoryError;

  async fn insert(&self, input: NewContact) -> Result<Contact, MemoryError> {
    let mut rows = self.rows.lock().unwrap();
    Self::check_unique(&rows, None, &input)?;

    let mut next_id = self.next_id.lock().unwrap();
    *next_id += 1;
    let now = Utc::now();
    let contact = Contact {
      id:          *next_id,
      first_name:  input.first_name,
      last_name:   input.last_name,
      email:       input.email,
      phone:       input.phone,
      address:     input.address,
      city:        input.city,
      postal_code: input.postal_code,
      created_at:  now,
      updated_at:  now,
    };
    rows.insert(contact.id, contact.clone());
    Ok(contact)
  }

  async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, MemoryError> {
    Ok(self.rows.lock().unwrap().get(&id).cloned())
  }

  async fn find_by_email(&self, email: &str) -> Result<Option<Contact>, MemoryError> {
    if self.blind_lookups {
      return Ok(None);
    }
    Ok(self.filtered(|c| c.email == email).into_iter().next())
  }

  async fn find_by_phone(&self, phone: &str) -> Result<Option<Contact>, MemoryError> {
    if self.blind_lookups {
      return Ok(None);
    }
    Ok(self.filtered(|c| c.phone == phone).into_iter().next())
  }

  async fn update(
    &self,
    id: ContactId,
    input: NewContact,
  ) -> Result<Option<Contact>, MemoryError> {
    let mut rows = self.rows.lock().unwrap();
    Self::check_unique(&rows, Some(id), &input)?;

    let Some(c) = rows.get_mut(&id) else {
      return Ok(None);
    };
    c.first_name = input.first_name;
    c.last_name = input.last_name;
    c.email = input.email;
    c.phone = input.phone;
    c.address = input.address;
    c.city = input.city;
    c.postal_code = input.postal_code;
    c.updated_at = Utc::now().max(c.created_at);
    Ok(Some(c.clone()))
  }

  async fn delete(&self, id: ContactId) -> Result<bool, MemoryError> {
    Ok(self.rows.lock().unwrap().remove(&id).is_some())
  }

  async fn find_all(&self) -> Result<Vec<Contact>, MemoryError> {
    Ok(self.filtered(|_| true))
  }

  async fn find_by_city(&self, city: &str) -> Result<Vec<Contact>, MemoryError> {
    Ok(self.filtered(|c| c.city.as_deref() == Some(city)))
  }

  async fn search_by_name(&self, fragment: &str) -> Result<Vec<Contact>, MemoryError> {
    let needle = fragment.to_lowercase();
    Ok(self.filtered(|c| {
      c.first_name.to_lowercase().contains(&needle)
        || c.last_name.to_lowercase().contains(&needle)
    }))
  }
}
