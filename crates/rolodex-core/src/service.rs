//! [`ContactService`] — uniqueness checks and orchestration over a
//! [`ContactStore`].

use std::sync::Arc;

use crate::{
  Error, Result,
  contact::{Contact, ContactId, NewContact, UniqueField},
  store::{ContactStore, StoreError},
};

/// Stateless orchestration over an injected store.
///
/// Cloning is cheap; the store handle is shared.
pub struct ContactService<S> {
  store: Arc<S>,
}

impl<S> Clone for ContactService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: ContactStore> ContactService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub fn store(&self) -> &S { &self.store }

  /// Every contact, ordered by id.
  pub async fn list_all(&self) -> Result<Vec<Contact>> {
    self.store.find_all().await.map_err(classify)
  }

  pub async fn get(&self, id: ContactId) -> Result<Contact> {
    self
      .store
      .find_by_id(id)
      .await
      .map_err(classify)?
      .ok_or(Error::NotFound(id))
  }

  /// Insert `input` unless its email or phone is already taken.
  pub async fn create(&self, input: NewContact) -> Result<Contact> {
    self.ensure_unique(None, &input).await?;

    let contact = self.store.insert(input).await.map_err(|e| {
      let err = classify(e);
      log_conflict(&err, None);
      err
    })?;
    tracing::info!(id = contact.id, "contact created");
    Ok(contact)
  }

  /// Replace every mutable field of contact `id`.
  ///
  /// A contact keeping its own email or phone is not a conflict.
  pub async fn update(&self, id: ContactId, input: NewContact) -> Result<Contact> {
    self.get(id).await?;
    self.ensure_unique(Some(id), &input).await?;

    let contact = self
      .store
      .update(id, input)
      .await
      .map_err(|e| {
        let err = classify(e);
        log_conflict(&err, Some(id));
        err
      })?
      .ok_or(Error::NotFound(id))?;
    tracing::info!(id, "contact updated");
    Ok(contact)
  }

  pub async fn delete(&self, id: ContactId) -> Result<()> {
    if !self.store.delete(id).await.map_err(classify)? {
      return Err(Error::NotFound(id));
    }
    tracing::info!(id, "contact deleted");
    Ok(())
  }

  /// Contacts whose first or last name contains `fragment`, ignoring case.
  pub async fn search(&self, fragment: &str) -> Result<Vec<Contact>> {
    self.store.search_by_name(fragment).await.map_err(classify)
  }

  /// Contacts whose city is exactly `city`.
  pub async fn by_city(&self, city: &str) -> Result<Vec<Contact>> {
    self.store.find_by_city(city).await.map_err(classify)
  }

  /// Application-level uniqueness check. `own` is the contact being updated,
  /// whose current values do not count as taken.
  async fn ensure_unique(&self, own: Option<ContactId>, input: &NewContact) -> Result<()> {
    let holder = self
      .store
      .find_by_email(&input.email)
      .await
      .map_err(classify)?;
    if holder.is_some_and(|c| Some(c.id) != own) {
      let err = Error::Conflict(UniqueField::Email);
      log_conflict(&err, own);
      return Err(err);
    }

    let holder = self
      .store
      .find_by_phone(&input.phone)
      .await
      .map_err(classify)?;
    if holder.is_some_and(|c| Some(c.id) != own) {
      let err = Error::Conflict(UniqueField::Phone);
      log_conflict(&err, own);
      return Err(err);
    }

    Ok(())
  }
}

/// Map a backend error onto the service taxonomy.
fn classify<E: StoreError>(e: E) -> Error {
  match e.unique_violation() {
    Some(field) => Error::Conflict(field),
    None => Error::Store(Box::new(e)),
  }
}

fn log_conflict(err: &Error, id: Option<ContactId>) {
  if let Error::Conflict(field) = err {
    tracing::warn!(?id, %field, "duplicate contact rejected");
  }
}
