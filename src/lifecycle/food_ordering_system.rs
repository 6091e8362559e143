use crate::clients::{AccountClient, OrderClient};
use crate::config::AppConfig;
use crate::services::{AccountService, OrderHistoryService, OrderingService};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The runtime orchestrator of the ordering backend.
///
/// `FoodOrderingSystem` spawns the account and order stores, wires the order store to the
/// account store (orders check their client on creation) and exposes the services built on
/// top of them.
///
/// # Example
///
/// ```ignore
/// let system = FoodOrderingSystem::new(&AppConfig::default());
///
/// let outcome = system.account_service.register(form).await;
/// let result = system.ordering_service.process_order(&mut session, Utc::now()).await;
///
/// system.shutdown().await?;
/// ```
pub struct FoodOrderingSystem {
    pub account_client: AccountClient,
    pub order_client: OrderClient,
    pub account_service: AccountService,
    pub ordering_service: OrderingService,

    account_handle: JoinHandle<()>,
    order_handle: JoinHandle<()>,
}

impl FoodOrderingSystem {
    /// Creates both stores and spawns each in its own Tokio task.
    pub fn new(config: &AppConfig) -> Self {
        let (account_actor, account_client) = crate::account_actor::new(config.mailbox_size);
        let (order_actor, order_client) = crate::order_actor::new(config.mailbox_size);

        let account_handle = tokio::spawn(account_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(account_client.clone()));

        let history = OrderHistoryService::new(account_client.clone(), order_client.clone());
        let account_service = AccountService::new(account_client.clone());
        let ordering_service =
            OrderingService::new(account_client.clone(), order_client.clone(), Arc::new(history));

        info!(mailbox_size = config.mailbox_size, "System started");
        Self {
            account_client,
            order_client,
            account_service,
            ordering_service,
            account_handle,
            order_handle,
        }
    }

    /// Gracefully shuts down both stores.
    ///
    /// Dropping every client closes the order store; once it has stopped it releases its
    /// own account client, which lets the account store stop as well. Clones handed out by
    /// the caller must be dropped first or this waits forever.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.ordering_service);
        drop(self.account_service);
        drop(self.order_client);
        drop(self.account_client);

        for (name, handle) in [("order", self.order_handle), ("account", self.account_handle)] {
            if let Err(e) = handle.await {
                error!(store = name, "Actor task failed: {:?}", e);
                return Err(format!("{name} store task failed: {e:?}"));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
