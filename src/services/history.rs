use crate::clients::{AccountClient, OrderClient};
use crate::model::ClientOrderHistory;
use crate::services::{HistoryError, OrderHistorySource};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Builds a client's order history from the account and order stores.
#[derive(Clone)]
pub struct OrderHistoryService {
    accounts: AccountClient,
    orders: OrderClient,
}

impl OrderHistoryService {
    pub fn new(accounts: AccountClient, orders: OrderClient) -> Self {
        Self { accounts, orders }
    }
}

#[async_trait]
impl OrderHistorySource for OrderHistoryService {
    #[instrument(skip(self))]
    async fn client_order_history(&self, username: &str) -> Result<ClientOrderHistory, HistoryError> {
        let client = self
            .accounts
            .find_by_username(username)
            .await
            .map_err(|e| HistoryError::Unavailable(e.to_string()))?
            .ok_or_else(|| HistoryError::UnknownClient(username.to_string()))?;

        let orders = self
            .orders
            .orders_for_client(client.id)
            .await
            .map_err(|e| HistoryError::Unavailable(e.to_string()))?;
        debug!(client_id = %client.id, count = orders.len(), "Orders loaded");

        Ok(ClientOrderHistory::new(client.id, client.user.username, orders))
    }
}
