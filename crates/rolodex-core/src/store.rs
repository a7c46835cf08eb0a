//! The `ContactStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `rolodex-store-sqlite`).
//! [`ContactService`](crate::service::ContactService) depends on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::contact::{Contact, ContactId, NewContact, UniqueField};

/// Errors raised by a [`ContactStore`] backend.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// If the failed write was rejected by a uniqueness constraint, the field
  /// it collided on.
  fn unique_violation(&self) -> Option<UniqueField>;
}

/// Durable keyed storage of contacts.
///
/// Backends must reject a write that would give two contacts the same email
/// or phone, reporting it through [`StoreError::unique_violation`]. The
/// service checks first, but only the store can close the race between
/// concurrent writers.
///
/// Sequence-returning reads are ordered by id ascending.
pub trait ContactStore: Send + Sync {
  type Error: StoreError;

  /// Persist a new contact. The store assigns `id`, `created_at`, and
  /// `updated_at` (the two timestamps are equal).
  fn insert(
    &self,
    input: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Retrieve a contact by id. Returns `None` if not found.
  fn find_by_id(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  fn find_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + 'a;

  fn find_by_phone<'a>(
    &'a self,
    phone: &'a str,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + 'a;

  /// Overwrite every mutable field of contact `id` and refresh `updated_at`.
  /// Returns `None` if no such contact exists.
  fn update(
    &self,
    id: ContactId,
    input: NewContact,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Permanently remove contact `id`. Returns `false` if it did not exist.
  fn delete(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn find_all(&self) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Contacts whose city equals `city` exactly.
  fn find_by_city<'a>(
    &'a self,
    city: &'a str,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + 'a;

  /// Contacts whose first or last name contains `fragment`, ignoring case.
  fn search_by_name<'a>(
    &'a self,
    fragment: &'a str,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + 'a;
}
