//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (pings the database)
//!
//! # Auth
//! POST /api/auth/signup         - Register (returns profile + token)
//! POST /api/auth/login          - Login (returns profile + token)
//!
//! # Products
//! GET  /api/products            - Product listing, ?q= filters
//! GET  /api/products/{id}       - Product detail
//!
//! # Files
//! POST /api/upload              - Upload an image (multipart, field `file`)
//! GET  /api/files/{fileId}      - Serve a stored file
//! GET  /api/files/{fileId}/info - Stored file metadata (no payload)
//!
//! # Account (requires bearer token)
//! PUT  /api/user/avatar         - Replace avatar (multipart, field `avatar`)
//!
//! # Listing copy (requires bearer token)
//! POST /api/listing/generate    - Generate AI marketing copy
//! ```

pub mod account;
pub mod auth;
pub mod files;
pub mod listing;
pub mod products;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Extra multipart framing headroom on top of the payload limit.
const BODY_LIMIT_HEADROOM: usize = 64 * 1024;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create all API routes for the storefront.
pub fn routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth_routes())
        .nest("/api/products", product_routes())
        .route("/api/upload", post(files::upload))
        .route("/api/files/{fileId}", get(files::serve))
        .route("/api/files/{fileId}/info", get(files::info))
        .route("/api/user/avatar", put(account::update_avatar))
        .route("/api/listing/generate", post(listing::generate))
        // Oversized payloads are rejected in the handlers with a clear
        // message; the body limit just has to let them through.
        .layer(DefaultBodyLimit::max(max_upload_bytes + BODY_LIMIT_HEADROOM))
}
