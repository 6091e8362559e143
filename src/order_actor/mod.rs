//! Order store: placed food orders and their status transitions.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::OrderClient;
use crate::framework::ResourceActor;
use crate::model::FoodOrder;

/// Creates a new order store and its client.
///
/// The store must be run with an [`AccountClient`](crate::clients::AccountClient) as its
/// context; new orders are checked against it.
pub fn new(buffer_size: usize) -> (ResourceActor<FoodOrder>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
