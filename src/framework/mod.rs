//! Generic store framework backing the data-access layer.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that stored resources implement
//! - [`ResourceActor`] - Generic store actor that owns the records
//! - [`ResourceClient`] - Type-safe handle for sending requests to a store
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning real stores.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use self::core::*;
