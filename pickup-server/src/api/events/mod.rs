//! Event subscription routes (SSE)
//!
//! | Path | Scope |
//! |------|-------|
//! | /api/events/staff | every order event, system-wide |
//! | /api/events/customer/{customer_id} | one customer's orders only |
//!
//! Each stream is lazy, unbounded, and non-restartable: it starts at
//! subscription time, yields events while the connection lasts, and ends
//! with no replay when either side disconnects. Clients that may have
//! missed events while disconnected reconcile through the order queries.

use std::convert::Infallible;

use axum::{
    Router,
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
};
use futures::Stream;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use shared::OrderEvent;

use crate::core::ServerState;

/// Event router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/events/staff", get(staff))
        .route("/api/events/customer/{customer_id}", get(customer))
}

/// Subscribe to the staff channel
async fn staff(
    State(state): State<ServerState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    sse_stream(state.broadcaster.subscribe_staff())
}

/// Subscribe to one customer's channel
async fn customer(
    State(state): State<ServerState>,
    Path(customer_id): Path<String>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    sse_stream(state.broadcaster.subscribe_customer(&customer_id))
}

/// Adapt a broadcast receiver into an SSE stream.
///
/// A lagged receiver skips the dropped events and continues - at-most-once
/// delivery, no replay. The stream ends when the channel closes.
fn sse_stream(
    rx: broadcast::Receiver<OrderEvent>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = futures::stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => match Event::default().json_data(&event) {
                    Ok(sse_event) => return Some((Ok(sse_event), rx)),
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to encode order event");
                        continue;
                    }
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event subscriber lagged, events dropped");
                    continue;
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}
