//! Core types for ClearCart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod file_id;
pub mod id;
pub mod price;

pub use email::{Email, EmailError};
pub use file_id::{FileId, FileIdError};
pub use id::*;
pub use price::{CurrencyCode, Price};
