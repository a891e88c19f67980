//! Order submission pipeline
//!
//! Composes cart snapshot validation, authoritative re-pricing, persistence,
//! and the creation broadcast into one operation. Every check runs before
//! the first gateway write; client-declared prices are never trusted - a
//! product changed between cart-build and submission surfaces as a
//! validation error, not a stale charge.

use std::sync::Arc;

use shared::OrderEvent;
use shared::cart::CartSnapshot;
use shared::models::{Order, OrderCreate, OrderItem, PaymentMethod, PickupInfo};
use shared::pricing;

use crate::broadcast::EventBroadcaster;
use crate::catalog::ProductCatalog;
use crate::gateway::OrderGateway;
use crate::notify::Notifier;

use super::error::{OrderFlowError, OrderFlowResult};

/// Turns a cart snapshot plus checkout metadata into a persisted order
#[derive(Clone)]
pub struct SubmissionPipeline {
    catalog: Arc<dyn ProductCatalog>,
    gateway: Arc<dyn OrderGateway>,
    broadcaster: Arc<EventBroadcaster>,
    notifier: Arc<dyn Notifier>,
}

impl SubmissionPipeline {
    pub fn new(
        catalog: Arc<dyn ProductCatalog>,
        gateway: Arc<dyn OrderGateway>,
        broadcaster: Arc<EventBroadcaster>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            catalog,
            gateway,
            broadcaster,
            notifier,
        }
    }

    /// Validate and persist a checkout.
    ///
    /// The caller owns the live cart; this pipeline only reads the snapshot,
    /// so clearing the cart after a successful submission is the caller's
    /// responsibility.
    pub async fn submit(
        &self,
        cart: &CartSnapshot,
        customer_id: Option<String>,
        payment_method: &str,
        pickup: PickupInfo,
    ) -> OrderFlowResult<Order> {
        if cart.is_empty() {
            return Err(OrderFlowError::validation("Cart is empty"));
        }

        let mut problems: Vec<String> = Vec::new();

        let method = match payment_method.parse::<PaymentMethod>() {
            Ok(method) => Some(method),
            Err(e) => {
                problems.push(e.to_string());
                None
            }
        };

        if pickup.pickup_time.trim().is_empty() {
            problems.push("Pickup time is required".to_string());
        }
        if pickup.contact_number.trim().is_empty() {
            problems.push("Contact number is required".to_string());
        }

        // Authoritative re-pricing against current product data
        let mut items = Vec::with_capacity(cart.lines.len());
        let mut total: i64 = 0;
        for line in &cart.lines {
            if line.quantity == 0 {
                problems.push(format!("\"{}\" has zero quantity", line.name));
                continue;
            }
            let product = match self
                .catalog
                .get_product(&line.product_id)
                .await
                .map_err(|e| OrderFlowError::Gateway(e.to_string()))?
            {
                Some(product) if product.is_available => product,
                Some(_) => {
                    problems.push(format!("\"{}\" is no longer available", line.name));
                    continue;
                }
                None => {
                    problems.push(format!("\"{}\" is no longer on the menu", line.name));
                    continue;
                }
            };

            match pricing::unit_price(&product, &line.variants, &line.addons) {
                Ok(unit_price) if unit_price == line.unit_price => {
                    total += unit_price * i64::from(line.quantity);
                    items.push(OrderItem {
                        product_id: product.id.clone(),
                        name: product.name.clone(),
                        category: product.category.clone(),
                        image: product.image.clone(),
                        unit_price,
                        quantity: line.quantity,
                        variants: line.variants.clone(),
                        addons: line.addons.clone(),
                    });
                }
                Ok(unit_price) => problems.push(format!(
                    "Price of \"{}\" changed from {} to {}",
                    line.name, line.unit_price, unit_price
                )),
                Err(issues) => problems.extend(
                    issues
                        .iter()
                        .map(|issue| format!("\"{}\": {}", line.name, issue)),
                ),
            }
        }

        if problems.is_empty() && cart.total != total {
            problems.push(format!(
                "Cart total {} does not match the computed total {}",
                cart.total, total
            ));
        }

        let method = match (method, problems.is_empty()) {
            (Some(method), true) => method,
            _ => return Err(OrderFlowError::Validation(problems)),
        };

        let order = self
            .gateway
            .create_order(OrderCreate {
                customer_id,
                items,
                total,
                payment_method: method,
                pickup,
            })
            .await
            .map_err(|e| OrderFlowError::Gateway(e.to_string()))?;

        self.broadcaster.publish(&OrderEvent::created(order.clone()));
        if let Err(e) = self.notifier.order_confirmation(&order).await {
            tracing::warn!(order_id = %order.id, error = %e, "Confirmation notification failed");
        }

        tracing::info!(
            order_id = %order.id,
            customer_id = order.customer_id.as_deref(),
            total = order.total,
            items = order.items.len(),
            "Order created"
        );
        Ok(order)
    }
}
