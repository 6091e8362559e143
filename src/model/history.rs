use crate::model::{ClientId, FoodOrder};

/// Every order a client has placed, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientOrderHistory {
    pub client_id: ClientId,
    pub username: String,
    pub orders: Vec<FoodOrder>,
}

impl ClientOrderHistory {
    pub fn new(client_id: ClientId, username: impl Into<String>, mut orders: Vec<FoodOrder>) -> Self {
        orders.sort_by(|a, b| b.order_time.cmp(&a.order_time).then(b.id.cmp(&a.id)));
        Self {
            client_id,
            username: username.into(),
            orders,
        }
    }
}
