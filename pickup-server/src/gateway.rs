//! Order persistence gateway
//!
//! Order storage is an external collaborator: the engine reads and writes
//! records only through [`OrderGateway`]. Orders are never deleted -
//! cancellation is a terminal status, not removal. [`MemoryOrderGateway`]
//! backs tests and the default wiring; a deployment substitutes its own
//! implementation.

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Serialize;
use shared::models::{FulfillmentStatus, Order, OrderCreate, PaymentStatus};
use thiserror::Error;

/// Gateway errors
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The compare-and-set guard failed: the stored status moved between the
    /// caller's read and this write
    #[error("Concurrent update on order {order_id}: status is {actual}, expected {expected}")]
    Conflict {
        order_id: String,
        expected: FulfillmentStatus,
        actual: FulfillmentStatus,
    },

    #[error("Backend error: {0}")]
    Backend(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Listing filter
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<FulfillmentStatus>,
    pub customer_id: Option<String>,
}

/// Page request (1-based)
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
        }
    }
}

/// One page of orders, newest first
#[derive(Debug, Clone, Serialize)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub total: u64,
    pub total_pages: u32,
    pub current_page: u32,
}

/// Aggregate counts for the staff dashboard
#[derive(Debug, Clone, Serialize)]
pub struct OrderStats {
    pub total: u64,
    pub pending: u64,
    pub completed: u64,
    pub cancelled: u64,
    /// Revenue of completed orders, in cents
    pub total_amount: i64,
}

/// Persistence operations consumed by the order engine
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Persist a new order in `PENDING` fulfillment state
    async fn create_order(&self, data: OrderCreate) -> GatewayResult<Order>;

    async fn get_order_by_id(&self, id: &str) -> GatewayResult<Option<Order>>;

    /// Compare-and-set status update. The write happens only while the
    /// stored status still equals `expected`; otherwise
    /// [`GatewayError::Conflict`] reports the actual status and nothing is
    /// written. Last-write-wins on status is not available through this
    /// interface.
    async fn update_order_status(
        &self,
        id: &str,
        expected: FulfillmentStatus,
        target: FulfillmentStatus,
    ) -> GatewayResult<Order>;

    /// List orders newest first
    async fn list_orders(&self, filter: &OrderFilter, page: PageRequest)
    -> GatewayResult<OrderPage>;

    async fn order_stats(&self) -> GatewayResult<OrderStats>;
}

/// In-memory order gateway
#[derive(Debug, Default)]
pub struct MemoryOrderGateway {
    orders: DashMap<String, Order>,
}

impl MemoryOrderGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[async_trait]
impl OrderGateway for MemoryOrderGateway {
    async fn create_order(&self, data: OrderCreate) -> GatewayResult<Order> {
        let now = chrono::Utc::now().timestamp_millis();
        let order = Order {
            id: uuid::Uuid::new_v4().to_string(),
            customer_id: data.customer_id,
            items: data.items,
            total: data.total,
            payment_method: data.payment_method,
            payment_status: PaymentStatus::default(),
            fulfillment_status: FulfillmentStatus::default(),
            pickup: data.pickup,
            created_at: now,
            updated_at: now,
        };
        self.orders.insert(order.id.clone(), order.clone());
        Ok(order)
    }

    async fn get_order_by_id(&self, id: &str) -> GatewayResult<Option<Order>> {
        Ok(self.orders.get(id).map(|entry| entry.value().clone()))
    }

    async fn update_order_status(
        &self,
        id: &str,
        expected: FulfillmentStatus,
        target: FulfillmentStatus,
    ) -> GatewayResult<Order> {
        // get_mut holds the shard lock, making the check-then-write atomic
        let mut entry = self
            .orders
            .get_mut(id)
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))?;
        if entry.fulfillment_status != expected {
            return Err(GatewayError::Conflict {
                order_id: id.to_string(),
                expected,
                actual: entry.fulfillment_status,
            });
        }
        entry.fulfillment_status = target;
        entry.updated_at = chrono::Utc::now().timestamp_millis();
        Ok(entry.clone())
    }

    async fn list_orders(
        &self,
        filter: &OrderFilter,
        page: PageRequest,
    ) -> GatewayResult<OrderPage> {
        let mut orders: Vec<Order> = self
            .orders
            .iter()
            .filter(|entry| {
                filter
                    .status
                    .is_none_or(|status| entry.fulfillment_status == status)
                    && filter
                        .customer_id
                        .as_deref()
                        .is_none_or(|id| entry.customer_id.as_deref() == Some(id))
            })
            .map(|entry| entry.value().clone())
            .collect();
        orders.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let total = orders.len() as u64;
        let per_page = page.per_page.max(1) as usize;
        let current_page = page.page.max(1);
        let total_pages = orders.len().div_ceil(per_page) as u32;
        let orders = orders
            .into_iter()
            .skip((current_page as usize - 1) * per_page)
            .take(per_page)
            .collect();

        Ok(OrderPage {
            orders,
            total,
            total_pages,
            current_page,
        })
    }

    async fn order_stats(&self) -> GatewayResult<OrderStats> {
        let mut stats = OrderStats {
            total: 0,
            pending: 0,
            completed: 0,
            cancelled: 0,
            total_amount: 0,
        };
        for entry in self.orders.iter() {
            stats.total += 1;
            match entry.fulfillment_status {
                FulfillmentStatus::Pending => stats.pending += 1,
                FulfillmentStatus::Completed => {
                    stats.completed += 1;
                    stats.total_amount += entry.total;
                }
                FulfillmentStatus::Cancelled => stats.cancelled += 1,
                _ => {}
            }
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{PaymentMethod, PickupInfo};

    fn order_data(customer: Option<&str>, total: i64) -> OrderCreate {
        OrderCreate {
            customer_id: customer.map(str::to_string),
            items: Vec::new(),
            total,
            payment_method: PaymentMethod::Cod,
            pickup: PickupInfo {
                pickup_time: "18:30".to_string(),
                contact_number: "09171234567".to_string(),
                special_instructions: None,
            },
        }
    }

    #[tokio::test]
    async fn created_orders_start_pending() {
        let gateway = MemoryOrderGateway::new();
        let order = gateway.create_order(order_data(None, 7500)).await.unwrap();

        assert_eq!(order.fulfillment_status, FulfillmentStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Pending);

        let fetched = gateway.get_order_by_id(&order.id).await.unwrap();
        assert_eq!(fetched, Some(order));
    }

    #[tokio::test]
    async fn cas_update_rejects_a_stale_expectation() {
        let gateway = MemoryOrderGateway::new();
        let order = gateway.create_order(order_data(None, 7500)).await.unwrap();

        gateway
            .update_order_status(
                &order.id,
                FulfillmentStatus::Pending,
                FulfillmentStatus::Confirmed,
            )
            .await
            .unwrap();

        // Second writer still believes the order is PENDING
        let err = gateway
            .update_order_status(
                &order.id,
                FulfillmentStatus::Pending,
                FulfillmentStatus::Cancelled,
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Conflict {
                actual: FulfillmentStatus::Confirmed,
                ..
            }
        ));

        // The winning write stands
        let stored = gateway
            .get_order_by_id(&order.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.fulfillment_status, FulfillmentStatus::Confirmed);
    }

    #[tokio::test]
    async fn concurrent_cas_updates_have_exactly_one_winner() {
        let gateway = std::sync::Arc::new(MemoryOrderGateway::new());
        let order = gateway.create_order(order_data(None, 7500)).await.unwrap();

        let a = {
            let gateway = gateway.clone();
            let id = order.id.clone();
            tokio::spawn(async move {
                gateway
                    .update_order_status(
                        &id,
                        FulfillmentStatus::Pending,
                        FulfillmentStatus::Confirmed,
                    )
                    .await
            })
        };
        let b = {
            let gateway = gateway.clone();
            let id = order.id.clone();
            tokio::spawn(async move {
                gateway
                    .update_order_status(
                        &id,
                        FulfillmentStatus::Pending,
                        FulfillmentStatus::Cancelled,
                    )
                    .await
            })
        };

        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        assert_eq!(
            [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(),
            1,
            "exactly one concurrent transition must win"
        );
    }

    #[tokio::test]
    async fn listing_filters_and_paginates_newest_first() {
        let gateway = MemoryOrderGateway::new();
        for i in 0..5 {
            let customer = if i % 2 == 0 { Some("cust-1") } else { None };
            gateway
                .create_order(order_data(customer, 1000 + i))
                .await
                .unwrap();
        }

        let all = gateway
            .list_orders(&OrderFilter::default(), PageRequest { page: 1, per_page: 2 })
            .await
            .unwrap();
        assert_eq!(all.total, 5);
        assert_eq!(all.total_pages, 3);
        assert_eq!(all.orders.len(), 2);

        let mine = gateway
            .list_orders(
                &OrderFilter {
                    customer_id: Some("cust-1".to_string()),
                    ..Default::default()
                },
                PageRequest::default(),
            )
            .await
            .unwrap();
        assert_eq!(mine.total, 3);
        assert!(
            mine.orders
                .iter()
                .all(|o| o.customer_id.as_deref() == Some("cust-1"))
        );
    }

    #[tokio::test]
    async fn stats_count_by_status_and_sum_completed_revenue() {
        let gateway = MemoryOrderGateway::new();
        let a = gateway.create_order(order_data(None, 1000)).await.unwrap();
        let b = gateway.create_order(order_data(None, 2500)).await.unwrap();
        gateway.create_order(order_data(None, 400)).await.unwrap();

        for (id, path) in [
            (&a.id, &[
                FulfillmentStatus::Confirmed,
                FulfillmentStatus::Preparing,
                FulfillmentStatus::Ready,
                FulfillmentStatus::Completed,
            ][..]),
            (&b.id, &[FulfillmentStatus::Cancelled][..]),
        ] {
            let mut current = FulfillmentStatus::Pending;
            for target in path {
                gateway
                    .update_order_status(id, current, *target)
                    .await
                    .unwrap();
                current = *target;
            }
        }

        let stats = gateway.order_stats().await.unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.cancelled, 1);
        assert_eq!(stats.total_amount, 1000);
    }
}
