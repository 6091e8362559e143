use crate::clients::{AccountClient, OrderClient};
use crate::model::{ClientOrderHistory, FoodOrder, FoodOrderCreate, OrderId};
use crate::order_actor::OrderError;
use crate::policy::cancellation::{attempt_cancellation, CancellationOutcome};
use crate::services::{CheckoutSession, OrderHistorySource, PrincipalSource};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

pub const ORDER_PROCESSED_MESSAGE: &str = "Order processed successfully!";
pub const NO_ORDER_MESSAGE: &str = "No order found to display.";
pub const ORDER_UNAVAILABLE_MESSAGE: &str = "Order details could not be retrieved.";
pub const NOT_LOGGED_IN_MESSAGE: &str = "User not found. Please login again.";
pub const HISTORY_UNAVAILABLE_MESSAGE: &str = "Unable to retrieve orders at this time.";

#[derive(Debug, Clone, PartialEq)]
pub enum OrderProcessing {
    Processed { unique_food_number: String },
    Failed(String),
}

impl OrderProcessing {
    pub fn message(&self) -> &str {
        match self {
            OrderProcessing::Processed { .. } => ORDER_PROCESSED_MESSAGE,
            OrderProcessing::Failed(message) => message,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderSummary {
    NoOrder(&'static str),
    Unavailable(&'static str),
    Found(FoodOrder),
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderHistoryView {
    NotLoggedIn(&'static str),
    Unavailable(&'static str),
    Found(ClientOrderHistory),
}

/// Order placement, summary, history and cancellation.
#[derive(Clone)]
pub struct OrderingService {
    accounts: AccountClient,
    orders: OrderClient,
    history: Arc<dyn OrderHistorySource>,
}

impl OrderingService {
    pub fn new(accounts: AccountClient, orders: OrderClient, history: Arc<dyn OrderHistorySource>) -> Self {
        Self {
            accounts,
            orders,
            history,
        }
    }

    /// Places an order from the session's delivery and items, at time `now`.
    ///
    /// On success the new unique food number is remembered in `session`.
    #[instrument(skip_all, fields(username = %session.username))]
    pub async fn process_order(&self, session: &mut CheckoutSession, now: DateTime<Utc>) -> OrderProcessing {
        match self.place(session, now).await {
            Ok(order) => {
                info!(order_id = %order.id, total = %order.total_price, "Order processed");
                session.unique_food_number = Some(order.unique_food_number.clone());
                OrderProcessing::Processed {
                    unique_food_number: order.unique_food_number,
                }
            }
            Err(reason) => {
                error!(%reason, "Order processing failed");
                OrderProcessing::Failed(format!("Error processing order: {reason}"))
            }
        }
    }

    async fn place(&self, session: &CheckoutSession, now: DateTime<Utc>) -> Result<FoodOrder, OrderError> {
        let delivery = session
            .delivery
            .clone()
            .ok_or_else(|| OrderError::ValidationError("no delivery address".into()))?;
        if session.items.is_empty() {
            return Err(OrderError::ValidationError("order has no items".into()));
        }
        let client = self
            .accounts
            .find_by_username(&session.username)
            .await
            .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))?
            .ok_or_else(|| OrderError::InvalidClient(session.username.clone()))?;

        self.orders
            .place_order(FoodOrderCreate {
                unique_food_number: Uuid::new_v4().to_string(),
                client_id: client.id,
                order_time: now,
                items: session.items.clone(),
                delivery,
            })
            .await
    }

    /// The order placed from this session, if it can still be read back.
    #[instrument(skip_all, fields(username = %session.username))]
    pub async fn order_summary(&self, session: &CheckoutSession) -> OrderSummary {
        let Some(unique_food_number) = session.unique_food_number.as_deref() else {
            return OrderSummary::NoOrder(NO_ORDER_MESSAGE);
        };
        match self.orders.find_by_unique_food_number(unique_food_number).await {
            Ok(Some(order)) => OrderSummary::Found(order),
            Ok(None) => {
                warn!(unique_food_number, "Order missing from store");
                OrderSummary::Unavailable(ORDER_UNAVAILABLE_MESSAGE)
            }
            Err(e) => {
                error!(error = %e, "Order lookup failed");
                OrderSummary::Unavailable(ORDER_UNAVAILABLE_MESSAGE)
            }
        }
    }

    #[instrument(skip_all)]
    pub async fn client_orders<P>(&self, principal_source: &P) -> OrderHistoryView
    where
        P: PrincipalSource + ?Sized,
    {
        let Some(principal) = principal_source.authenticated_principal() else {
            return OrderHistoryView::NotLoggedIn(NOT_LOGGED_IN_MESSAGE);
        };
        match self.history.client_order_history(&principal.username).await {
            Ok(history) => OrderHistoryView::Found(history),
            Err(e) => {
                error!(error = %e, username = %principal.username, "Order history failed");
                OrderHistoryView::Unavailable(HISTORY_UNAVAILABLE_MESSAGE)
            }
        }
    }

    /// Cancels `order_id` if it was placed less than the cancellation window ago.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: OrderId) -> Result<CancellationOutcome, OrderError> {
        attempt_cancellation(&self.orders, order_id, Utc::now()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_create, MockClient};
    use crate::framework::FrameworkError;
    use crate::model::{AppUser, Client, ClientId, DeliveryAddressForm, OrderItem, Principal};
    use crate::services::{submit_delivery_address, HistoryError};
    use async_trait::async_trait;
    use rust_decimal::Decimal;

    struct FailingHistory;

    #[async_trait]
    impl OrderHistorySource for FailingHistory {
        async fn client_order_history(&self, _username: &str) -> Result<ClientOrderHistory, HistoryError> {
            Err(HistoryError::Unavailable("store closed".into()))
        }
    }

    fn service(accounts: &MockClient<Client>, orders: &MockClient<FoodOrder>) -> OrderingService {
        OrderingService::new(
            AccountClient::new(accounts.client()),
            OrderClient::new(orders.client()),
            Arc::new(FailingHistory),
        )
    }

    fn test_client() -> Client {
        Client {
            id: ClientId(1),
            full_name: "Test User".into(),
            phone_number: "1234567890".into(),
            user: AppUser {
                username: "testUser".into(),
                email: "test@example.com".into(),
                enabled: true,
            },
        }
    }

    fn ready_session() -> CheckoutSession {
        let mut session = CheckoutSession::new("testUser");
        submit_delivery_address(
            &mut session,
            &DeliveryAddressForm::new("Main Street", "123", "", "10000", "TestCity", ""),
        );
        session.add_item(OrderItem {
            name: "Pierogi".into(),
            unit_price: Decimal::new(2200, 2),
            quantity: 2,
        });
        session
    }

    #[tokio::test]
    async fn missing_delivery_fails_before_any_store_call() {
        let accounts = MockClient::<Client>::new();
        let orders = MockClient::<FoodOrder>::new();
        let mut session = CheckoutSession::new("testUser");

        let result = service(&accounts, &orders).process_order(&mut session, Utc::now()).await;

        assert!(result.message().starts_with("Error processing order: "));
        assert_eq!(session.unique_food_number, None);
        accounts.verify();
        orders.verify();
    }

    #[tokio::test]
    async fn store_failure_is_reported_with_reason() {
        let mut accounts = MockClient::<Client>::new();
        accounts.expect_find().return_ok(vec![test_client()]);
        let mut orders = MockClient::<FoodOrder>::new();
        orders.expect_create().return_err(FrameworkError::ActorClosed);
        let mut session = ready_session();

        let result = service(&accounts, &orders).process_order(&mut session, Utc::now()).await;

        assert!(matches!(result, OrderProcessing::Failed(_)));
        assert!(result.message().starts_with("Error processing order: "));
        assert_eq!(session.unique_food_number, None);
        accounts.verify();
        orders.verify();
    }

    #[tokio::test]
    async fn placed_order_carries_session_contents() {
        let mut accounts = MockClient::<Client>::new();
        accounts.expect_find().return_ok(vec![test_client()]);
        let (order_client, mut requests) = create_mock_client::<FoodOrder>(4);
        let service = OrderingService::new(
            AccountClient::new(accounts.client()),
            OrderClient::new(order_client),
            Arc::new(FailingHistory),
        );
        let mut session = ready_session();
        let now = Utc::now();

        let store = async {
            let (params, respond_to) = expect_create(&mut requests).await.expect("create request");
            assert_eq!(params.client_id, ClientId(1));
            assert_eq!(params.order_time, now);
            assert_eq!(params.items, ready_session().items);
            assert!(Uuid::parse_str(&params.unique_food_number).is_ok());
            let _ = respond_to.send(Ok(FoodOrder::new(OrderId(1), params)));
        };
        let (result, ()) = tokio::join!(service.process_order(&mut session, now), store);

        let OrderProcessing::Processed { unique_food_number } = result else {
            panic!("order should be processed");
        };
        assert_eq!(session.unique_food_number, Some(unique_food_number));
        accounts.verify();
    }

    #[tokio::test]
    async fn summary_without_order_in_session() {
        let accounts = MockClient::<Client>::new();
        let orders = MockClient::<FoodOrder>::new();

        let summary = service(&accounts, &orders).order_summary(&ready_session()).await;

        assert_eq!(summary, OrderSummary::NoOrder("No order found to display."));
    }

    #[tokio::test]
    async fn summary_for_vanished_order_is_unavailable() {
        let accounts = MockClient::<Client>::new();
        let mut orders = MockClient::<FoodOrder>::new();
        orders.expect_find().return_ok(vec![]);
        let mut session = ready_session();
        session.unique_food_number = Some("gone".into());

        let summary = service(&accounts, &orders).order_summary(&session).await;

        assert_eq!(summary, OrderSummary::Unavailable("Order details could not be retrieved."));
        orders.verify();
    }

    #[tokio::test]
    async fn history_requires_a_principal() {
        let accounts = MockClient::<Client>::new();
        let orders = MockClient::<FoodOrder>::new();

        let view = service(&accounts, &orders).client_orders(&None::<Principal>).await;

        assert_eq!(view, OrderHistoryView::NotLoggedIn("User not found. Please login again."));
    }

    #[tokio::test]
    async fn history_failure_is_unavailable() {
        let accounts = MockClient::<Client>::new();
        let orders = MockClient::<FoodOrder>::new();

        let view = service(&accounts, &orders).client_orders(&Principal::new("testUser")).await;

        assert_eq!(view, OrderHistoryView::Unavailable("Unable to retrieve orders at this time."));
    }
}
