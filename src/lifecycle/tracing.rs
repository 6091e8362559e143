//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the `tracing` subscriber used by the binary.
//!
//! The level filter comes from `RUST_LOG`; the output style from
//! [`AppConfig::log_format`](crate::config::AppConfig). Module paths are hidden
//! (`with_target(false)`): store logs carry an `entity_type` field instead.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Full request payloads at store boundaries
//! RUST_LOG=debug cargo run
//!
//! # Multi-line output
//! FOOD_ORDERING_LOG_FORMAT=pretty RUST_LOG=info cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! Placing an order with `RUST_LOG=debug`:
//!
//! ```text
//! DEBUG process_order:find_by_username: Looking up client username="testUser"
//! DEBUG Find entity_type="Client" matches=1
//! INFO process_order:place_order: Sending place_order to actor client_id=client_1
//! DEBUG Create entity_type="FoodOrder" params=FoodOrderCreate { .. }
//! DEBUG on_create: Validating client order_id=order_1 client_id=client_1
//! DEBUG Get entity_type="Client" id=client_1 found=true
//! INFO Created entity_type="FoodOrder" size=1
//! INFO process_order: Order processed order_id=order_1 total=44.00
//! ```

use crate::config::LogFormat;

pub fn setup_tracing(format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false); // entity_type replaces module paths

    match format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}
