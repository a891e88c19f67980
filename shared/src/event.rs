//! Broadcast events - immutable facts published after persistence commits
//!
//! Delivery is at-most-once and non-durable: subscribers that were not
//! connected at emission time reconcile by querying the server directly.

use serde::{Deserialize, Serialize};

use crate::models::{FulfillmentStatus, Order};

/// Event envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderEvent {
    /// Event unique ID
    pub event_id: String,
    /// Server timestamp (Unix milliseconds)
    pub timestamp: i64,
    pub payload: EventPayload,
}

/// Event payload variants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventPayload {
    /// A new order was persisted
    OrderCreated { order: Order },

    /// An order's fulfillment status changed
    StatusUpdated {
        order_id: String,
        status: FulfillmentStatus,
        /// Full updated order, so receivers can overwrite local state
        /// unconditionally instead of merging
        order: Order,
    },
}

impl OrderEvent {
    fn envelope(payload: EventPayload) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            payload,
        }
    }

    /// Creation event for a freshly persisted order
    pub fn created(order: Order) -> Self {
        Self::envelope(EventPayload::OrderCreated { order })
    }

    /// Status-update event carrying the committed order state
    pub fn status_updated(order: Order) -> Self {
        Self::envelope(EventPayload::StatusUpdated {
            order_id: order.id.clone(),
            status: order.fulfillment_status,
            order,
        })
    }

    /// Order this event concerns
    pub fn order_id(&self) -> &str {
        match &self.payload {
            EventPayload::OrderCreated { order } => &order.id,
            EventPayload::StatusUpdated { order_id, .. } => order_id,
        }
    }

    /// Owning customer, if the order has one
    pub fn customer_id(&self) -> Option<&str> {
        match &self.payload {
            EventPayload::OrderCreated { order } | EventPayload::StatusUpdated { order, .. } => {
                order.customer_id.as_deref()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrderCreate, PaymentMethod, PickupInfo};

    fn sample_order(customer: Option<&str>) -> Order {
        let data = OrderCreate {
            customer_id: customer.map(str::to_string),
            items: Vec::new(),
            total: 7500,
            payment_method: PaymentMethod::Cod,
            pickup: PickupInfo {
                pickup_time: "18:30".to_string(),
                contact_number: "09171234567".to_string(),
                special_instructions: None,
            },
        };
        Order {
            id: "order-1".to_string(),
            customer_id: data.customer_id,
            items: data.items,
            total: data.total,
            payment_method: data.payment_method,
            payment_status: Default::default(),
            fulfillment_status: Default::default(),
            pickup: data.pickup,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn creation_event_carries_owner() {
        let event = OrderEvent::created(sample_order(Some("cust-9")));
        assert_eq!(event.order_id(), "order-1");
        assert_eq!(event.customer_id(), Some("cust-9"));

        let guest = OrderEvent::created(sample_order(None));
        assert_eq!(guest.customer_id(), None);
    }

    #[test]
    fn payload_serializes_with_screaming_tag() {
        let mut order = sample_order(None);
        order.fulfillment_status = FulfillmentStatus::Ready;
        let event = OrderEvent::status_updated(order);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["payload"]["type"], "STATUS_UPDATED");
        assert_eq!(json["payload"]["status"], "READY");
        assert_eq!(json["payload"]["order_id"], "order-1");
    }
}
