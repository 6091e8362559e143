//! # Food Ordering
//!
//! Back end of a food-ordering site: client registration, delivery address capture,
//! order placement and time-limited cancellation.
//!
//! ## Architecture Notes
//!
//! ### 1. Stores as actors
//! Client accounts and food orders each live in a [`ResourceActor`](framework::ResourceActor)
//! running in its own Tokio task. Requests are processed one at a time, so uniqueness
//! checks (username, email, unique food number) need no locks.
//!
//! ### 2. Type-safe errors
//! Each store has its own error enum ([`AccountError`](account_actor::AccountError),
//! [`OrderError`](order_actor::OrderError)). Clients recover them from
//! [`FrameworkError`](framework::FrameworkError) so callers can match on them.
//!
//! ### 3. Policies behind traits
//! The registration and cancellation rules in [`policy`] talk to their collaborators
//! through the traits in [`services::collaborators`], which the store clients implement
//! and tests replace with fakes.
//!
//! ### 4. Observability
//! `tracing` everywhere, with structured fields. See [`lifecycle::tracing`].
//!
//! ## Module Tour
//!
//! - [`framework`] - the generic store actor, its client and the test mock
//! - [`model`] - clients, orders, deliveries, menus
//! - [`account_actor`], [`order_actor`] - the two stores
//! - [`clients`] - [`AccountClient`](clients::AccountClient), [`OrderClient`](clients::OrderClient)
//! - [`policy`] - registration outcome, delivery address formatting, cancellation guard
//! - [`services`] - page-level facades used by the request pipeline
//! - [`lifecycle`] - [`FoodOrderingSystem`](lifecycle::FoodOrderingSystem) and tracing setup
//! - [`config`] - environment configuration
//!
//! ### Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod account_actor;
pub mod clients;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod policy;
pub mod services;
