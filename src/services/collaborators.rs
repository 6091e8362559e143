//! Seams between the policies and whatever backs them.
//!
//! The store clients implement these traits for production; tests substitute fakes.

use crate::model::{Client, ClientOrderHistory, ClientProfile, Credentials, FoodOrder, FoodOrderStatus, OrderId, Principal};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use thiserror::Error;

/// Why an account could not be registered.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegistrationError {
    /// The username or the email is already in use. The payload names the colliding key.
    #[error("Duplicate identity: {0}")]
    DuplicateIdentity(String),

    /// Anything else: validation, storage, communication.
    #[error("Registration failure: {0}")]
    Failure(String),
}

/// Creates a client together with its login identity, atomically.
#[async_trait]
pub trait AccountRegistry: Send + Sync {
    async fn register_account(
        &self,
        profile: ClientProfile,
        credentials: Credentials,
    ) -> Result<Client, RegistrationError>;
}

/// Order lookup and status persistence.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// `Ok(None)` means no such order; `Err` means the lookup itself failed.
    async fn find_order_by_id(&self, id: OrderId) -> Result<Option<FoodOrder>, OrderError>;

    async fn update_order_status(&self, id: OrderId, status: FoodOrderStatus) -> Result<FoodOrder, OrderError>;
}

/// Why a client's order history could not be produced.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum HistoryError {
    #[error("Unknown client: {0}")]
    UnknownClient(String),

    #[error("Order history unavailable: {0}")]
    Unavailable(String),
}

/// Every order of the client owning `username`.
#[async_trait]
pub trait OrderHistorySource: Send + Sync {
    async fn client_order_history(&self, username: &str) -> Result<ClientOrderHistory, HistoryError>;
}

/// The currently authenticated user, if any.
pub trait PrincipalSource {
    fn authenticated_principal(&self) -> Option<Principal>;
}

impl PrincipalSource for Option<Principal> {
    fn authenticated_principal(&self) -> Option<Principal> {
        self.clone()
    }
}

impl PrincipalSource for Principal {
    fn authenticated_principal(&self) -> Option<Principal> {
        Some(self.clone())
    }
}
