//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] clearcart_core::EmailError),

    /// Invalid credentials (wrong password or user not found).
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// User not found.
    #[error("User not found")]
    UserNotFound,

    /// User already exists.
    #[error("User with this email already exists")]
    UserAlreadyExists,

    /// Password too weak or invalid.
    #[error("{0}")]
    WeakPassword(String),

    /// A required field was missing or empty.
    #[error("{0}")]
    MissingField(&'static str),

    /// Token signing or verification failure.
    #[error("invalid or expired token")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
