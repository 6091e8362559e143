//! Food orders and their lifecycle status.

use crate::model::{ClientId, Delivery, MenuItem};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u64);

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Lifecycle status of a [`FoodOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FoodOrderStatus {
    Placed,
    Cancelled,
}

impl FoodOrderStatus {
    /// Whether a record in this status may move to `next`. Only `PLACED -> CANCELLED` is allowed.
    pub fn can_transition_to(self, next: FoodOrderStatus) -> bool {
        matches!((self, next), (FoodOrderStatus::Placed, FoodOrderStatus::Cancelled))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FoodOrderStatus::Placed => "PLACED",
            FoodOrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl Display for FoodOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for FoodOrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PLACED" => Ok(FoodOrderStatus::Placed),
            "CANCELLED" => Ok(FoodOrderStatus::Cancelled),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl OrderItem {
    pub fn from_menu_item(item: &MenuItem, quantity: u32) -> Self {
        Self {
            name: item.name.clone(),
            unit_price: item.price,
            quantity,
        }
    }

    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A placed food order.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be kept by the order store.
///
/// See [`impl ActorEntity for FoodOrder`](#impl-ActorEntity-for-FoodOrder) for details on:
/// - Creation parameters ([`FoodOrderCreate`])
/// - Update parameters ([`FoodOrderUpdate`])
#[derive(Debug, Clone, PartialEq)]
pub struct FoodOrder {
    pub id: OrderId,
    /// Customer-facing reference shown on the order summary.
    pub unique_food_number: String,
    pub client_id: ClientId,
    pub order_time: DateTime<Utc>,
    pub status: FoodOrderStatus,
    pub items: Vec<OrderItem>,
    pub total_price: Decimal,
    pub delivery: Delivery,
}

/// Payload for placing a new order. Status and total are derived, never supplied.
#[derive(Debug, Clone)]
pub struct FoodOrderCreate {
    pub unique_food_number: String,
    pub client_id: ClientId,
    pub order_time: DateTime<Utc>,
    pub items: Vec<OrderItem>,
    pub delivery: Delivery,
}

/// Payload for changing the status of an existing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodOrderUpdate {
    pub status: FoodOrderStatus,
}

impl FoodOrder {
    /// Creates a freshly placed order; the total is the sum of its lines.
    pub fn new(id: OrderId, params: FoodOrderCreate) -> Self {
        let total_price = params.items.iter().map(OrderItem::line_total).sum();
        Self {
            id,
            unique_food_number: params.unique_food_number,
            client_id: params.client_id,
            order_time: params.order_time,
            status: FoodOrderStatus::Placed,
            items: params.items,
            total_price,
            delivery: params.delivery,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_placed_orders_can_be_cancelled() {
        assert!(FoodOrderStatus::Placed.can_transition_to(FoodOrderStatus::Cancelled));
        assert!(!FoodOrderStatus::Cancelled.can_transition_to(FoodOrderStatus::Placed));
        assert!(!FoodOrderStatus::Cancelled.can_transition_to(FoodOrderStatus::Cancelled));
        assert!(!FoodOrderStatus::Placed.can_transition_to(FoodOrderStatus::Placed));
    }

    #[test]
    fn status_text_matches_stored_form() {
        assert_eq!(FoodOrderStatus::Cancelled.to_string(), "CANCELLED");
        assert_eq!("placed".parse::<FoodOrderStatus>(), Ok(FoodOrderStatus::Placed));
        assert!("DELIVERED".parse::<FoodOrderStatus>().is_err());
    }

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        let item = OrderItem {
            name: "Margherita".into(),
            unit_price: Decimal::new(2450, 2),
            quantity: 3,
        };
        assert_eq!(item.line_total(), Decimal::new(7350, 2));
    }
}
