pub mod food_ordering_system;
pub mod tracing;

pub use food_ordering_system::*;
pub use self::tracing::*;
