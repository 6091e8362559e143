//! Error types for the order store.

use crate::model::FoodOrderStatus;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The client placing the order is unknown to the account store.
    #[error("Invalid client: {0}")]
    InvalidClient(String),

    /// The requested status change is not allowed from the current status.
    #[error("Cannot change order status from {from} to {to}")]
    InvalidTransition {
        from: FoodOrderStatus,
        to: FoodOrderStatus,
    },

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the store.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}
