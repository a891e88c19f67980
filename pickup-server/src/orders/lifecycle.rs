//! Order lifecycle state machine
//!
//! # Transition Flow
//!
//! ```text
//! transition(order_id, target)
//!     ├─ 1. Load current order (NotFound if absent)
//!     ├─ 2. target == current → idempotent Ok, no side effects
//!     ├─ 3. Validate reachability (InvalidTransition otherwise)
//!     ├─ 4. Compare-and-set persist (Conflict if the status moved)
//!     ├─ 5. Best-effort customer notification (logged, never fatal)
//!     └─ 6. Broadcast emission (logged, never fatal)
//! ```
//!
//! Concurrent transitions on the same order serialize through the gateway's
//! compare-and-set: the loser is rejected, not retried, and last-write-wins
//! on status does not exist.

use std::sync::Arc;

use shared::OrderEvent;
use shared::models::{FulfillmentStatus, Order};

use crate::broadcast::EventBroadcaster;
use crate::gateway::OrderGateway;
use crate::notify::Notifier;

use super::error::{OrderFlowError, OrderFlowResult};

/// Executes fulfillment status transitions
#[derive(Clone)]
pub struct LifecycleEngine {
    gateway: Arc<dyn OrderGateway>,
    broadcaster: Arc<EventBroadcaster>,
    notifier: Arc<dyn Notifier>,
}

impl LifecycleEngine {
    pub fn new(
        gateway: Arc<dyn OrderGateway>,
        broadcaster: Arc<EventBroadcaster>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            gateway,
            broadcaster,
            notifier,
        }
    }

    /// Move an order to `target`, returning the committed order state.
    ///
    /// Requesting the status the order already has is an idempotent no-op
    /// success: no write, no notification, no broadcast.
    pub async fn transition(
        &self,
        order_id: &str,
        target: FulfillmentStatus,
    ) -> OrderFlowResult<Order> {
        let order = self
            .gateway
            .get_order_by_id(order_id)
            .await?
            .ok_or_else(|| OrderFlowError::NotFound(order_id.to_string()))?;

        let current = order.fulfillment_status;
        if current == target {
            return Ok(order);
        }
        if !current.can_transition_to(target) {
            return Err(OrderFlowError::InvalidTransition {
                from: current,
                to: target,
            });
        }

        let updated = self
            .gateway
            .update_order_status(order_id, current, target)
            .await?;

        if let Err(e) = self.notifier.status_changed(&updated).await {
            tracing::warn!(order_id = %updated.id, error = %e, "Status notification failed");
        }
        self.broadcaster
            .publish(&OrderEvent::status_updated(updated.clone()));

        tracing::info!(order_id = %updated.id, from = %current, to = %target, "Order status updated");
        Ok(updated)
    }
}
