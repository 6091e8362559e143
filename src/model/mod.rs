//! Domain values: accounts, orders, deliveries, menus and order history.
//!
//! [`Client`] and [`FoodOrder`] implement [`ActorEntity`](crate::framework::ActorEntity)
//! and are kept by the stores; everything else is plain data passed between the
//! request pipeline and the policies.

pub mod client;
pub mod delivery;
pub mod history;
pub mod menu;
pub mod order;

pub use client::*;
pub use delivery::*;
pub use history::*;
pub use menu::*;
pub use order::*;
