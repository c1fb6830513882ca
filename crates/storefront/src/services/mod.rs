//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - User authentication and session tokens
//! - `listing` - AI listing-copy generation client

pub mod auth;
pub mod listing;

pub use auth::{AuthService, TokenCodec};
pub use listing::ListingClient;
