//! Client error types

use shared::pricing::PricingIssue;
use thiserror::Error;

use crate::store::StoreError;

/// Cart errors
#[derive(Debug, Error)]
pub enum CartError {
    #[error("Product is not available: {0}")]
    ProductUnavailable(String),

    #[error("Selection rejected: {}", issue_summary(.0))]
    InvalidSelection(Vec<PricingIssue>),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type CartResult<T> = Result<T, CartError>;

fn issue_summary(issues: &[PricingIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
