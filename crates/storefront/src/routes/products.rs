//! Product route handlers.
//!
//! JSON API over the canonical catalog. Listing supports a free-text
//! `q` query parameter handled by the two-stage filter.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use clearcart_core::ProductId;

use crate::catalog::Product;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Product listing response.
#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
    pub total: usize,
}

/// List products, optionally filtered by a search query.
///
/// GET /api/products?q=...
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<ProductsResponse> {
    let q = query.q.as_deref().unwrap_or_default();
    let products: Vec<Product> = state
        .catalog()
        .search(q)
        .into_iter()
        .cloned()
        .collect();

    Json(ProductsResponse {
        total: products.len(),
        products,
    })
}

/// Show a single product.
///
/// GET /api/products/{id}
///
/// # Errors
///
/// Returns 404 if the id is not in the catalog.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>> {
    state
        .catalog()
        .get(ProductId::new(id))
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
}
