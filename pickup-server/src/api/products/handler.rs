//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use shared::models::Product;

use crate::catalog::ProductCatalog;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// List the menu
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let products = state
        .catalog
        .list_products()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    Ok(Json(products))
}

/// Get one product
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let product = state
        .catalog
        .get_product(&id)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))?;
    Ok(Json(product))
}
