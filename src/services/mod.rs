//! Request-pipeline facades over the stores and policies.
//!
//! - [`collaborators`] - traits the policies depend on
//! - [`account`] - registration and profile pages
//! - [`checkout`] - per-user checkout session and delivery form handling
//! - [`ordering`] - order placement, summary, history and cancellation
//! - [`history`] - order history assembled from both stores

pub mod account;
pub mod checkout;
pub mod collaborators;
pub mod history;
pub mod ordering;

pub use account::*;
pub use checkout::*;
pub use collaborators::*;
pub use history::*;
pub use ordering::*;
