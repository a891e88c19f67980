use shared::models::FulfillmentStatus;
use thiserror::Error;

use crate::gateway::GatewayError;

/// Order engine errors
#[derive(Debug, Error)]
pub enum OrderFlowError {
    /// Recoverable input problems, surfaced before any persistence attempt
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Order not found: {0}")]
    NotFound(String),

    /// Requested status is not reachable from the current status (including
    /// any attempt to leave a terminal state). Never coerced to the nearest
    /// valid status.
    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition {
        from: FulfillmentStatus,
        to: FulfillmentStatus,
    },

    /// A concurrent transition won the race; re-fetch the order and decide
    /// whether the transition still applies
    #[error("Concurrent transition on order {0}")]
    Conflict(String),

    #[error("Gateway error: {0}")]
    Gateway(String),
}

impl OrderFlowError {
    pub fn validation(problem: impl Into<String>) -> Self {
        Self::Validation(vec![problem.into()])
    }
}

impl From<GatewayError> for OrderFlowError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::NotFound(id) => Self::NotFound(id),
            GatewayError::Conflict { order_id, .. } => Self::Conflict(order_id),
            GatewayError::Backend(msg) => Self::Gateway(msg),
        }
    }
}

pub type OrderFlowResult<T> = Result<T, OrderFlowError>;
