//! # Core Store Framework
//!
//! The data-access layer of the application is a set of in-memory stores, one per
//! persisted resource (client accounts, food orders). Each store is a [`ResourceActor`]
//! that owns its records and answers requests sent through a [`ResourceClient`].
//!
//! ## Key Types
//!
//! - [`ActorEntity`]: The trait every stored resource implements.
//! - [`ResourceActor`]: The generic store actor.
//! - [`ResourceClient`]: The cloneable handle used to talk to a store.
//! - [`FrameworkError`]: Common errors (e.g., ActorClosed, NotFound, Conflict).

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any stored resource must implement to be managed by [`ResourceActor`].
///
/// # Architecture Note
/// By defining a contract (`ActorEntity`) that both `Client` and `FoodOrder` satisfy,
/// the store loop is written *once* and reused for every resource.
///
/// Associated types keep payloads apart: a `FoodOrder` store only accepts a
/// `FoodOrderCreate`, never an `AccountCreate`.
///
/// # Async & Context
/// Hooks are `async` so they may consult other stores (an order checks that its client
/// exists). The `Context` is injected through [`ResourceActor::run`], which lets stores be
/// created first and wired afterwards.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier generated by the store from a monotonically increasing counter.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u64>;

    /// The data required to create a new record.
    type CreateParams: Send + Sync + Debug;

    /// The data required to update an existing record.
    type UpdateParams: Send + Sync + Debug;

    /// Runtime dependencies injected into the store. Use `()` if none are needed.
    type Context: Send + Sync;

    /// Resource-specific error type, carried back to clients inside
    /// [`FrameworkError::EntityError`].
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the full record from the generated id and the create payload.
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, Self::Error>;

    /// Keys that must be unique across every record held by the store.
    fn unique_keys(&self) -> Vec<String> {
        Vec::new()
    }

    /// Called after construction and before the record becomes visible.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies an update to the record. Returning an error leaves the record untouched.
    async fn on_update(
        &mut self,
        update: Self::UpdateParams,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;
}

// =============================================================================
// 2. MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the store framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Unique key already taken: {0}")]
    Conflict(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

/// Type alias for the one-shot response channel used by stores.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Filter applied by a [`ResourceRequest::Find`].
pub type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Requests understood by a [`ResourceActor`].
///
/// Records are created, read, updated and queried. There is no delete: accounts and
/// orders are kept for the lifetime of the store and only change state.
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::UpdateParams,
        respond_to: Response<T>,
    },
    Find {
        predicate: Predicate<T>,
        respond_to: Response<Vec<T>>,
    },
}

impl<T: ActorEntity> Debug for ResourceRequest<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create { params, .. } => f.debug_struct("Create").field("params", params).finish(),
            Self::Get { id, .. } => f.debug_struct("Get").field("id", id).finish(),
            Self::Update { id, update, .. } => f
                .debug_struct("Update")
                .field("id", id)
                .field("update", update)
                .finish(),
            Self::Find { .. } => f.write_str("Find"),
        }
    }
}

// =============================================================================
// 3. THE STORE ACTOR
// =============================================================================

/// The generic actor that owns a collection of records.
///
/// **Concurrency Model**:
/// Every store processes its messages *sequentially*, so the `store` and the unique-key
/// `index` need no `Mutex`. A status change is therefore a single atomic step from the
/// point of view of any caller.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    index: HashMap<String, T::Id>,
    next_id: u64,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new store and the client used to reach it.
    ///
    /// `buffer_size` is the channel capacity; callers wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            index: HashMap::new(),
            next_id: 1,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the store's event loop until every client has been dropped.
    ///
    /// The `context` is handed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // "FoodOrder" rather than "food_ordering::model::order::FoodOrder"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, size = self.store.len(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = self.update(&id, update, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Updated"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Find {
                    predicate,
                    respond_to,
                } => {
                    let mut matching: Vec<(&T::Id, &T)> =
                        self.store.iter().filter(|(_, item)| predicate(item)).collect();
                    matching.sort_by(|(a, _), (b, _)| a.cmp(b));
                    let found: Vec<T> = matching.into_iter().map(|(_, item)| item.clone()).collect();
                    debug!(entity_type, matches = found.len(), "Find");
                    let _ = respond_to.send(Ok(found));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn create(&mut self, params: T::CreateParams, context: &T::Context) -> Result<T, FrameworkError> {
        let id = T::Id::from(self.next_id);
        let mut item =
            T::from_create_params(id.clone(), params).map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
        item.on_create(context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;

        let keys = item.unique_keys();
        if let Some(taken) = keys.iter().find(|key| self.index.contains_key(*key)) {
            return Err(FrameworkError::Conflict(taken.clone()));
        }

        self.next_id += 1;
        for key in keys {
            self.index.insert(key, id.clone());
        }
        self.store.insert(id, item.clone());
        Ok(item)
    }

    async fn update(&mut self, id: &T::Id, update: T::UpdateParams, context: &T::Context) -> Result<T, FrameworkError> {
        let current = self
            .store
            .get(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;

        // Work on a copy so a failed hook or a key collision leaves the record as it was.
        let mut candidate = current.clone();
        let old_keys = current.unique_keys();
        candidate
            .on_update(update, context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;

        let new_keys = candidate.unique_keys();
        if let Some(taken) = new_keys
            .iter()
            .find(|key| self.index.get(*key).is_some_and(|owner| owner != id))
        {
            return Err(FrameworkError::Conflict(taken.clone()));
        }

        for key in old_keys {
            self.index.remove(&key);
        }
        for key in new_keys {
            self.index.insert(key, id.clone());
        }
        self.store.insert(id.clone(), candidate.clone());
        Ok(candidate)
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A cloneable, type-safe handle to a [`ResourceActor`].
///
/// Holds only the sending half of the channel, so cloning is cheap and every clone
/// talks to the same store.
#[derive(Clone)]
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Create { params, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Get { id, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn update(&self, id: T::Id, update: T::UpdateParams) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Update {
                id,
                update,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Returns every record matching `predicate`, ordered by id.
    pub async fn find(
        &self,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Result<Vec<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Find {
                predicate: Box::new(predicate),
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}
