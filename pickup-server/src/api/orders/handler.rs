//! Customer Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use shared::cart::{CartLine, CartSnapshot};
use shared::models::{Order, PickupInfo};

use crate::core::ServerState;
use crate::gateway::{OrderFilter, OrderGateway, PageRequest};
use crate::utils::{AppError, AppResult};

/// Submit request body: the client's cart snapshot plus checkout metadata.
/// Prices and total are re-validated server-side.
#[derive(Debug, Deserialize)]
pub struct SubmitOrderRequest {
    pub items: Vec<CartLine>,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub customer_id: Option<String>,
    pub payment_method: String,
    pub pickup: PickupInfo,
}

/// Submit an order
pub async fn submit(
    State(state): State<ServerState>,
    Json(payload): Json<SubmitOrderRequest>,
) -> AppResult<Json<Order>> {
    let snapshot = CartSnapshot {
        lines: payload.items,
        total: payload.total,
    };
    let order = state
        .submission
        .submit(
            &snapshot,
            payload.customer_id,
            &payload.payment_method,
            payload.pickup,
        )
        .await?;
    Ok(Json(order))
}

/// Get order by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state
        .orders
        .get_order_by_id(&id)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(Json(order))
}

/// Query params for a customer's own orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub customer_id: String,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    50
}

/// List a customer's orders, newest first
pub async fn list_for_customer(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let page = state
        .orders
        .list_orders(
            &OrderFilter {
                customer_id: Some(query.customer_id),
                status: None,
            },
            PageRequest {
                page: 1,
                per_page: query.limit,
            },
        )
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    Ok(Json(page.orders))
}
