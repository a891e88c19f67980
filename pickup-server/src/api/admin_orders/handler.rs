//! Staff Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use shared::models::{FulfillmentStatus, Order};

use crate::core::ServerState;
use crate::gateway::{OrderFilter, OrderGateway, OrderPage, OrderStats, PageRequest};
use crate::utils::{AppError, AppResult};

/// Query params for the staff listing
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Status filter; "all" or absent means no filter
    #[serde(default)]
    pub status: Option<String>,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

/// List orders, paginated and optionally filtered by status
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<OrderPage>> {
    let status = match query.status.as_deref() {
        None | Some("all") => None,
        Some(s) => Some(
            s.parse::<FulfillmentStatus>()
                .map_err(|e| AppError::validation(e.to_string()))?,
        ),
    };

    let page = state
        .orders
        .list_orders(
            &OrderFilter {
                status,
                customer_id: None,
            },
            PageRequest {
                page: query.page,
                per_page: query.limit,
            },
        )
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    Ok(Json(page))
}

/// Transition request body
#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub order_id: String,
    pub status: String,
}

/// Move an order to a new fulfillment status
pub async fn transition(
    State(state): State<ServerState>,
    Json(payload): Json<TransitionRequest>,
) -> AppResult<Json<Order>> {
    apply_transition(&state, &payload.order_id, &payload.status).await
}

/// Status-only transition body for the path-addressed variant
#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: String,
}

/// Same transition, addressed by path
pub async fn transition_by_path(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusBody>,
) -> AppResult<Json<Order>> {
    apply_transition(&state, &id, &payload.status).await
}

async fn apply_transition(
    state: &ServerState,
    order_id: &str,
    status: &str,
) -> AppResult<Json<Order>> {
    let target = status
        .parse::<FulfillmentStatus>()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let order = state.lifecycle.transition(order_id, target).await?;
    Ok(Json(order))
}

/// Status counts and completed revenue for the dashboard
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<OrderStats>> {
    let stats = state
        .orders
        .order_stats()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    Ok(Json(stats))
}
