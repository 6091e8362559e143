//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).

pub mod account_client;
pub mod actor_client;
pub mod order_client;

pub use account_client::*;
pub use actor_client::*;
pub use order_client::*;
