//! Best-effort customer notifications
//!
//! Outbound email and receipt rendering are external collaborators. Every
//! call site logs and swallows failures: a notification error must never
//! convert a committed order or transition into a reported failure.

use async_trait::async_trait;
use shared::models::Order;
use thiserror::Error;

/// Notification failure (logged, never propagated past the call site)
#[derive(Debug, Error)]
#[error("Notification failed: {0}")]
pub struct NotifyError(pub String);

/// Notification hooks fired after persistence commits
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sent once after a successful submission
    async fn order_confirmation(&self, order: &Order) -> Result<(), NotifyError>;

    /// Sent after each fulfillment status change
    async fn status_changed(&self, order: &Order) -> Result<(), NotifyError>;
}

/// Default wiring: records the notification in the log instead of sending
#[derive(Debug, Default)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn order_confirmation(&self, order: &Order) -> Result<(), NotifyError> {
        tracing::info!(
            order_id = %order.id,
            customer_id = order.customer_id.as_deref(),
            total = order.total,
            "Order confirmation notification"
        );
        Ok(())
    }

    async fn status_changed(&self, order: &Order) -> Result<(), NotifyError> {
        tracing::info!(
            order_id = %order.id,
            customer_id = order.customer_id.as_deref(),
            status = %order.fulfillment_status,
            "Order status notification"
        );
        Ok(())
    }
}
