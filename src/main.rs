use chrono::Utc;
use food_ordering::config::AppConfig;
use food_ordering::lifecycle::{setup_tracing, FoodOrderingSystem};
use food_ordering::model::{DeliveryAddressForm, Menu, MenuItem, OrderItem, Principal, RegistrationForm};
use food_ordering::policy::RegistrationOutcome;
use food_ordering::services::{
    submit_delivery_address, CheckoutSession, DeliverySubmission, OrderHistoryView, OrderProcessing, OrderSummary,
};
use rust_decimal::Decimal;
use secrecy::SecretString;
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = AppConfig::from_env().map_err(|e| e.to_string())?;
    setup_tracing(config.log_format);

    info!("Starting food ordering demo");
    let system = FoodOrderingSystem::new(&config);

    let form = RegistrationForm {
        username: "alice".to_string(),
        password: SecretString::from("s3cret-pass".to_string()),
        email: "alice@example.com".to_string(),
        enabled: true,
        full_name: "Alice Nowak".to_string(),
        phone_number: "555-0100".to_string(),
    };
    let outcome = system
        .account_service
        .register(form)
        .instrument(tracing::info_span!("registration"))
        .await;
    let client = match outcome {
        RegistrationOutcome::Success(client) => client,
        other => {
            error!(outcome = ?other.message(), "Registration failed");
            system.shutdown().await?;
            return Err("registration failed".to_string());
        }
    };
    info!(client_id = %client.id, "Client registered");

    let menu = Menu::new(
        "Lunch",
        "Weekday lunch menu",
        vec![
            MenuItem::new("Pierogi", "Potato and cheese", Decimal::new(2200, 2)),
            MenuItem::new("Zurek", "Sour rye soup", Decimal::new(1800, 2)),
        ],
    );

    let mut session = CheckoutSession::new(client.user.username.clone());
    for (name, quantity) in [("pierogi", 2), ("zurek", 1)] {
        match menu.find_item(name) {
            Some(item) => session.add_item(OrderItem::from_menu_item(item, quantity)),
            None => warn!(name, "Not on the menu"),
        }
    }

    let address = DeliveryAddressForm::new("Main Street", "123", "42", "10000", "TestCity", "Leave at door");
    if let DeliverySubmission::Accepted(delivery) = submit_delivery_address(&mut session, &address) {
        info!(address = delivery.delivery_address(), "Delivery address accepted");
    }

    let processed = system
        .ordering_service
        .process_order(&mut session, Utc::now())
        .instrument(tracing::info_span!("order_processing"))
        .await;
    info!(result = processed.message(), "Checkout finished");

    if let OrderSummary::Found(order) = system.ordering_service.order_summary(&session).await {
        info!(order_id = %order.id, total = %order.total_price, status = %order.status, "Order summary");

        match system.ordering_service.cancel_order(order.id).await {
            Ok(cancellation) => info!(result = cancellation.message(), "Cancellation attempted"),
            Err(e) => error!(error = %e, "Cancellation failed"),
        }
    }

    let principal = Principal::new(client.user.username.clone());
    if let OrderHistoryView::Found(history) = system.ordering_service.client_orders(&principal).await {
        for order in &history.orders {
            info!(unique_food_number = %order.unique_food_number, status = %order.status, "History entry");
        }
    }

    if let OrderProcessing::Failed(reason) = processed {
        warn!(%reason, "Order was not placed");
    }

    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}
