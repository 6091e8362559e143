//! # Account Store
//!
//! Keeps registered [`Client`] profiles together with their linked [`AppUser`](crate::model::AppUser)
//! identity. The store has no dependencies (`Context = ()`).
//!
//! Usernames and emails are unique across the store, compared case-insensitively; a second
//! registration with either one taken fails with [`AccountError::DuplicateIdentity`].
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Client`]
//! - [`error`] - [`AccountError`] type
//! - [`new()`] - Factory function that creates the store and its client

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::AccountClient;
use crate::framework::ResourceActor;
use crate::model::Client;

/// Creates a new account store and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Client>, AccountClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, AccountClient::new(generic_client))
}
