//! ActorEntity implementation for the FoodOrder domain type.
//!
//! Orders depend on the account store: [`on_create`](ActorEntity::on_create) refuses an
//! order whose client does not exist. Status updates follow
//! [`FoodOrderStatus::can_transition_to`].

use super::OrderError;
use crate::clients::{AccountClient, ActorClient};
use crate::framework::ActorEntity;
use crate::model::{FoodOrder, FoodOrderCreate, FoodOrderUpdate, OrderId};
use async_trait::async_trait;
use tracing::{debug, instrument};

#[async_trait]
impl ActorEntity for FoodOrder {
    type Id = OrderId;
    type CreateParams = FoodOrderCreate;
    type UpdateParams = FoodOrderUpdate;
    type Context = AccountClient;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: FoodOrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::ValidationError("order has no items".into()));
        }
        if let Some(item) = params.items.iter().find(|item| item.quantity == 0) {
            return Err(OrderError::ValidationError(format!("zero quantity for {}", item.name)));
        }
        Ok(Self::new(id, params))
    }

    fn unique_keys(&self) -> Vec<String> {
        vec![self.unique_food_number.clone()]
    }

    #[instrument(skip(self, accounts), fields(order_id = %self.id, client_id = %self.client_id))]
    async fn on_create(&mut self, accounts: &AccountClient) -> Result<(), OrderError> {
        debug!("Validating client");
        match accounts.get(self.client_id).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(OrderError::InvalidClient(self.client_id.to_string())),
            Err(e) => Err(OrderError::ActorCommunicationError(e.to_string())),
        }
    }

    /// Moves the order to a new status, refusing anything but `PLACED -> CANCELLED`.
    async fn on_update(&mut self, update: FoodOrderUpdate, _ctx: &AccountClient) -> Result<(), OrderError> {
        if !self.status.can_transition_to(update.status) {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to: update.status,
            });
        }
        self.status = update.status;
        Ok(())
    }
}
