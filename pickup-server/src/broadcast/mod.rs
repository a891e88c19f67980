//! Event broadcaster - order event fan-out
//!
//! # Channels
//!
//! ```text
//! publish(event)
//!     ├─▶ staff channel        (every order mutation, system-wide)
//!     └─▶ customer channel     (only the owning customer's orders)
//! ```
//!
//! Delivery is at-most-once and non-durable: a send with no connected
//! receivers is dropped, a lagged receiver skips ahead, and nothing is
//! queued or retried. Receivers reconcile by querying the order endpoints on
//! (re)connect - push is a latency optimization, the persisted record is the
//! source of truth.
//!
//! The broadcaster is constructed at server start and injected through
//! [`ServerState`](crate::core::ServerState); there is no process-wide
//! registry.

use dashmap::DashMap;
use shared::OrderEvent;
use tokio::sync::broadcast;

/// Configuration for the broadcaster
#[derive(Debug, Clone)]
pub struct BroadcastConfig {
    /// Capacity of each broadcast channel (default: 1024)
    pub channel_capacity: usize,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 1024,
        }
    }
}

/// Fan-out hub for order events
#[derive(Debug)]
pub struct EventBroadcaster {
    /// Staff-wide channel: every order mutation
    staff_tx: broadcast::Sender<OrderEvent>,
    /// Per-customer channels, created on first subscribe
    customers: DashMap<String, broadcast::Sender<OrderEvent>>,
    channel_capacity: usize,
}

impl EventBroadcaster {
    /// Create a broadcaster with default configuration
    pub fn new() -> Self {
        Self::from_config(BroadcastConfig::default())
    }

    pub fn from_config(config: BroadcastConfig) -> Self {
        let (staff_tx, _) = broadcast::channel(config.channel_capacity);
        Self {
            staff_tx,
            customers: DashMap::new(),
            channel_capacity: config.channel_capacity,
        }
    }

    pub fn with_capacity(channel_capacity: usize) -> Self {
        Self::from_config(BroadcastConfig { channel_capacity })
    }

    /// Publish an event to the staff channel and, when the order has an
    /// owning customer, to that customer's channel.
    ///
    /// Fire-and-forget relative to the operation that triggered it: the
    /// persistence write has already committed, and nothing here can fail
    /// that operation.
    pub fn publish(&self, event: &OrderEvent) {
        if self.staff_tx.send(event.clone()).is_err() {
            tracing::debug!(order_id = %event.order_id(), "Staff broadcast dropped: no active receivers");
        }
        if let Some(customer_id) = event.customer_id() {
            self.publish_to_customer(customer_id, event);
        }
    }

    fn publish_to_customer(&self, customer_id: &str, event: &OrderEvent) {
        let delivered = match self.customers.get(customer_id) {
            Some(tx) => tx.send(event.clone()).is_ok(),
            // Never subscribed: the event is simply lost
            None => return,
        };
        if !delivered {
            // Every receiver disconnected; prune the idle channel. The guard
            // rechecks under the entry lock - a subscriber may have raced in.
            self.customers
                .remove_if(customer_id, |_, tx| tx.receiver_count() == 0);
            tracing::debug!(customer_id = %customer_id, "Customer broadcast dropped: no active receivers");
        }
    }

    /// Subscribe to every order event system-wide.
    ///
    /// The receiver yields events for as long as it is held; dropping it
    /// ends the sequence with no replay.
    pub fn subscribe_staff(&self) -> broadcast::Receiver<OrderEvent> {
        self.staff_tx.subscribe()
    }

    /// Subscribe to one customer's order events. The channel is created on
    /// first use.
    pub fn subscribe_customer(&self, customer_id: &str) -> broadcast::Receiver<OrderEvent> {
        self.customers
            .entry(customer_id.to_string())
            .or_insert_with(|| broadcast::channel(self.channel_capacity).0)
            .subscribe()
    }

    /// Number of connected staff receivers
    pub fn staff_receiver_count(&self) -> usize {
        self.staff_tx.receiver_count()
    }
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}
