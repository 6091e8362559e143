//! Error types for the account store.

use thiserror::Error;

/// Errors that can occur during account operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AccountError {
    /// The requested client was not found.
    #[error("Client not found: {0}")]
    NotFound(String),

    /// Another account already uses this username or email.
    #[error("Username or email already taken: {0}")]
    DuplicateIdentity(String),

    /// The account data provided is invalid.
    #[error("Account validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the store.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for AccountError {
    fn from(msg: String) -> Self {
        AccountError::ActorCommunicationError(msg)
    }
}
