//! Listing-copy generation route handlers.

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::extract::AppJson;
use crate::middleware::auth::RequireAuth;
use crate::services::listing::ListingCopy;
use crate::state::AppState;

/// Request to generate listing copy.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub image_url: String,
    pub description: String,
}

/// Generate marketing copy for a listing.
///
/// POST /api/listing/generate
///
/// Proxies to the external AI service; expect multi-second latency.
///
/// # Errors
///
/// Returns 400 for a missing or empty image URL or description, and 502
/// when the service fails or returns an unexpected shape.
pub async fn generate(
    State(state): State<AppState>,
    RequireAuth(current_user): RequireAuth,
    AppJson(req): AppJson<GenerateRequest>,
) -> Result<Json<ListingCopy>> {
    if req.image_url.trim().is_empty() {
        return Err(AppError::BadRequest("Image URL is required".to_string()));
    }
    if req.description.trim().is_empty() {
        return Err(AppError::BadRequest("Description is required".to_string()));
    }

    let copy = state
        .listing()
        .generate(&req.image_url, &req.description)
        .await?;

    tracing::info!(
        user_id = %current_user.user_id,
        trace_id = %copy.trace_id,
        "listing copy generated"
    );

    Ok(Json(copy))
}
