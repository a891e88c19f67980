//! HTTP API - routes and handlers
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`products`] - read-only menu access
//! - [`orders`] - submission and customer-facing order queries
//! - [`admin_orders`] - staff listing, stats, and status transitions
//! - [`events`] - SSE subscriptions (staff channel, per-customer channel)

pub mod admin_orders;
pub mod events;
pub mod health;
pub mod orders;
pub mod products;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Assemble the full application router
pub fn app(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(admin_orders::router())
        .merge(events::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
