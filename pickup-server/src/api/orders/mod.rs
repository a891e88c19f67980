//! Customer Order API Module
//!
//! Submission plus the queries customers fall back to when a push event was
//! missed.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::submit).get(handler::list_for_customer))
        .route("/{id}", get(handler::get_by_id))
}
