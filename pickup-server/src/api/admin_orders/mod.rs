//! Staff Order API Module
//!
//! Fulfillment management: listing, stats, and status transitions.
//! Authentication is handled by the surrounding application.

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

/// Admin order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).patch(handler::transition))
        .route("/stats", get(handler::stats))
        .route("/{id}/status", patch(handler::transition_by_path))
}
