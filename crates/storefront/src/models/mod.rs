//! Domain models for storefront.

pub mod user;

pub use user::{User, UserProfile};
