//! Core types, validation, and the contact service for Rolodex.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::ContactStore`]; the HTTP layer drives
//! [`service::ContactService`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod contact;
pub mod error;
pub mod service;
pub mod store;
pub mod validate;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
