use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{ClientId, FoodOrder, FoodOrderCreate, FoodOrderStatus, FoodOrderUpdate, OrderId};
use crate::order_actor::OrderError;
use crate::services::OrderRepository;
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the order store.
///
/// Client validation happens in the order store's `on_create` hook, so a placed order
/// always references an existing client.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<FoodOrder>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<FoodOrder>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, order), fields(client_id = %order.client_id, unique_food_number = %order.unique_food_number))]
    pub async fn place_order(&self, order: FoodOrderCreate) -> Result<FoodOrder, OrderError> {
        info!("Sending place_order to actor");
        self.inner.create(order).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn find_order_by_id(&self, id: OrderId) -> Result<Option<FoodOrder>, OrderError> {
        self.get(id).await
    }

    #[instrument(skip(self))]
    pub async fn update_order_status(&self, id: OrderId, status: FoodOrderStatus) -> Result<FoodOrder, OrderError> {
        debug!("Sending status update");
        self.inner
            .update(id, FoodOrderUpdate { status })
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn find_by_unique_food_number(&self, unique_food_number: &str) -> Result<Option<FoodOrder>, OrderError> {
        let wanted = unique_food_number.to_string();
        let matches = self
            .inner
            .find(move |order: &FoodOrder| order.unique_food_number == wanted)
            .await
            .map_err(Self::map_error)?;
        Ok(matches.into_iter().next())
    }

    #[instrument(skip(self))]
    pub async fn orders_for_client(&self, client_id: ClientId) -> Result<Vec<FoodOrder>, OrderError> {
        self.inner
            .find(move |order: &FoodOrder| order.client_id == client_id)
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<FoodOrder> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<FoodOrder> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::Conflict(key) => {
                OrderError::ValidationError(format!("unique food number already used: {key}"))
            }
            FrameworkError::EntityError(inner) => match inner.downcast::<OrderError>() {
                Ok(err) => *err,
                Err(other) => OrderError::ActorCommunicationError(other.to_string()),
            },
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[async_trait]
impl OrderRepository for OrderClient {
    async fn find_order_by_id(&self, id: OrderId) -> Result<Option<FoodOrder>, OrderError> {
        OrderClient::find_order_by_id(self, id).await
    }

    async fn update_order_status(&self, id: OrderId, status: FoodOrderStatus) -> Result<FoodOrder, OrderError> {
        OrderClient::update_order_status(self, id, status).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_update, MockClient};

    #[tokio::test]
    async fn missing_order_maps_to_not_found() {
        let mut mock = MockClient::<FoodOrder>::new();
        mock.expect_update(OrderId(9))
            .return_err(FrameworkError::NotFound("order_9".into()));
        let orders = OrderClient::new(mock.client());

        let result = orders.update_order_status(OrderId(9), FoodOrderStatus::Cancelled).await;

        assert_eq!(result, Err(OrderError::NotFound("order_9".into())));
        mock.verify();
    }

    #[tokio::test]
    async fn status_update_sends_only_the_new_status() {
        let (client, mut requests) = create_mock_client::<FoodOrder>(4);
        let orders = OrderClient::new(client);

        let store = async {
            let (id, update, respond_to) = expect_update(&mut requests).await.expect("update request");
            assert_eq!(id, OrderId(3));
            assert_eq!(update, FoodOrderUpdate { status: FoodOrderStatus::Cancelled });
            let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
        };
        let (result, ()) = tokio::join!(orders.update_order_status(OrderId(3), FoodOrderStatus::Cancelled), store);

        assert_eq!(result, Err(OrderError::NotFound("order_3".into())));
    }

    #[tokio::test]
    async fn invalid_client_survives_the_store_boundary() {
        let mut mock = MockClient::<FoodOrder>::new();
        mock.expect_get(OrderId(1))
            .return_err(FrameworkError::EntityError(Box::new(OrderError::InvalidClient("client_3".into()))));
        let orders = OrderClient::new(mock.client());

        let result = orders.find_order_by_id(OrderId(1)).await;

        assert_eq!(result, Err(OrderError::InvalidClient("client_3".into())));
        mock.verify();
    }

    #[tokio::test]
    async fn closed_store_is_a_communication_error() {
        let mut mock = MockClient::<FoodOrder>::new();
        mock.expect_find().return_err(FrameworkError::ActorClosed);
        let orders = OrderClient::new(mock.client());

        let result = orders.orders_for_client(ClientId(1)).await;

        assert!(matches!(result, Err(OrderError::ActorCommunicationError(_))));
        mock.verify();
    }
}
