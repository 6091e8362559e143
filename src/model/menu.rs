use crate::model::Delivery;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A restaurant menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub name: String,
    pub description: String,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub description: String,
    pub price: Decimal,
}

impl MenuItem {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
        }
    }
}

impl Menu {
    pub fn new(name: impl Into<String>, description: impl Into<String>, items: Vec<MenuItem>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            items,
        }
    }

    /// Looks an item up by name, ignoring case.
    pub fn find_item(&self, name: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.name.eq_ignore_ascii_case(name))
    }
}

/// A street a restaurant delivers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryStreet {
    pub street_name: String,
    pub postal_code: String,
    pub district: String,
}

impl DeliveryStreet {
    pub fn new(street_name: impl Into<String>, postal_code: impl Into<String>, district: impl Into<String>) -> Self {
        Self {
            street_name: street_name.into(),
            postal_code: postal_code.into(),
            district: district.into(),
        }
    }

    /// True when `delivery` is on this street: same street name (ignoring case and
    /// surrounding whitespace) and same postal code.
    pub fn covers(&self, delivery: &Delivery) -> bool {
        self.street_name.trim().to_lowercase() == delivery.street_name().trim().to_lowercase()
            && self.postal_code.trim() == delivery.postal_code().trim()
    }
}
