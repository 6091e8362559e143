use crate::model::{Delivery, DeliveryAddressForm, FieldError, OrderItem};
use crate::policy::delivery::format_delivery;
use tracing::{debug, instrument};

/// Per-user state carried across the checkout pages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutSession {
    pub username: String,
    pub delivery: Option<Delivery>,
    pub items: Vec<OrderItem>,
    /// Set once an order has been placed from this session.
    pub unique_food_number: Option<String>,
}

impl CheckoutSession {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    pub fn add_item(&mut self, item: OrderItem) {
        self.items.push(item);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeliverySubmission {
    /// The form was rejected; the session is unchanged.
    Invalid(Vec<FieldError>),
    Accepted(Delivery),
}

/// Validates the delivery form and, when valid, stores the formatted delivery in `session`.
#[instrument(skip_all, fields(username = %session.username))]
pub fn submit_delivery_address(session: &mut CheckoutSession, form: &DeliveryAddressForm) -> DeliverySubmission {
    if let Err(errors) = form.validate() {
        debug!(errors = errors.len(), "Delivery form rejected");
        return DeliverySubmission::Invalid(errors);
    }
    let delivery = format_delivery(form);
    debug!(address = delivery.delivery_address(), "Delivery accepted");
    session.delivery = Some(delivery.clone());
    DeliverySubmission::Accepted(delivery)
}
