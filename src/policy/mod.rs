//! Decision rules of the ordering flow.
//!
//! - [`registration`] turns a registration attempt into a user-facing outcome.
//! - [`delivery`] renders the single-line delivery address.
//! - [`cancellation`] guards order cancellation with a time window.

pub mod cancellation;
pub mod delivery;
pub mod registration;

pub use cancellation::*;
pub use delivery::*;
pub use registration::*;
