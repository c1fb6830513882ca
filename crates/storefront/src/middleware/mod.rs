//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. CORS layer
//!
//! Authentication is handled per-route via the [`auth::RequireAuth`]
//! extractor rather than a blanket layer, so public endpoints stay
//! public without an allowlist.

pub mod auth;

pub use auth::{CurrentUser, RequireAuth};
