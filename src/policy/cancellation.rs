//! The cancellation guard.
//!
//! An order may be cancelled only while strictly less than
//! [`CANCELLATION_WINDOW_MINUTES`] have passed since it was placed. A missing order is a
//! normal outcome, not an error; only a failing store produces `Err`.

use crate::model::{FoodOrderStatus, OrderId};
use crate::order_actor::OrderError;
use crate::services::OrderRepository;
use chrono::{DateTime, Duration, Utc};
use tracing::{info, instrument, warn};

pub const CANCELLATION_WINDOW_MINUTES: i64 = 20;

/// Why a cancellation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancellationRejection {
    WindowExpired,
    AlreadyCancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancellationOutcome {
    Cancelled,
    Rejected(CancellationRejection),
    NotFound,
}

impl CancellationOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            CancellationOutcome::Cancelled => "Order has been cancelled successfully.",
            CancellationOutcome::Rejected(CancellationRejection::WindowExpired) => {
                "Order cannot be cancelled after 20 minutes."
            }
            CancellationOutcome::Rejected(CancellationRejection::AlreadyCancelled) => {
                "Order has already been cancelled."
            }
            CancellationOutcome::NotFound => "Order not found.",
        }
    }
}

/// True while `now` is strictly less than the window length after `order_time`.
pub fn within_cancellation_window(order_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(order_time) < Duration::minutes(CANCELLATION_WINDOW_MINUTES)
}

/// Cancels order `order_id` if it is still inside the window.
///
/// The status update is issued at most once, and only on the `Cancelled` path.
#[instrument(skip(repository))]
pub async fn attempt_cancellation<R>(
    repository: &R,
    order_id: OrderId,
    now: DateTime<Utc>,
) -> Result<CancellationOutcome, OrderError>
where
    R: OrderRepository + ?Sized,
{
    let Some(order) = repository.find_order_by_id(order_id).await? else {
        warn!("Order not found");
        return Ok(CancellationOutcome::NotFound);
    };

    if order.status == FoodOrderStatus::Cancelled {
        warn!("Order already cancelled");
        return Ok(CancellationOutcome::Rejected(CancellationRejection::AlreadyCancelled));
    }

    let elapsed_secs = now.signed_duration_since(order.order_time).num_seconds();
    if !within_cancellation_window(order.order_time, now) {
        warn!(elapsed_secs, "Cancellation window expired");
        return Ok(CancellationOutcome::Rejected(CancellationRejection::WindowExpired));
    }

    // Another cancellation may land between the read above and this update.
    match repository
        .update_order_status(order_id, FoodOrderStatus::Cancelled)
        .await
    {
        Ok(_) => {
            info!(elapsed_secs, "Order cancelled");
            Ok(CancellationOutcome::Cancelled)
        }
        Err(OrderError::InvalidTransition {
            from: FoodOrderStatus::Cancelled,
            ..
        }) => {
            warn!("Order cancelled concurrently");
            Ok(CancellationOutcome::Rejected(CancellationRejection::AlreadyCancelled))
        }
        Err(e) => Err(e),
    }
}
