//! Authentication middleware and extractors.
//!
//! Provides extractors for requiring a bearer session token in route
//! handlers.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

use clearcart_core::UserId;

use crate::state::AppState;

/// The authenticated caller, decoded from a verified session token.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub email: String,
}

/// Extractor that requires a valid `Authorization: Bearer <token>` header.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Error returned when authentication is required but missing or invalid.
pub enum AuthRejection {
    /// No Authorization header, or not a Bearer scheme.
    MissingToken,
    /// Token failed verification (bad signature, malformed, expired).
    InvalidToken,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let message = match self {
            Self::MissingToken => "Authentication required",
            Self::InvalidToken => "Invalid or expired token",
        };
        (StatusCode::UNAUTHORIZED, Json(json!({ "error": message }))).into_response()
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AuthRejection::MissingToken)?;

        let claims = state
            .tokens()
            .verify(token)
            .map_err(|_| AuthRejection::InvalidToken)?;

        Ok(Self(CurrentUser {
            user_id: claims.sub,
            email: claims.email,
        }))
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/user/avatar");
        if let Some(v) = value {
            builder = builder.header(header::AUTHORIZATION, v);
        }
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn test_bearer_token_parsing() {
        let parts = parts_with_auth(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts), Some("abc.def.ghi"));
    }

    #[test]
    fn test_missing_header_rejected() {
        let parts = parts_with_auth(None);
        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn test_wrong_scheme_rejected() {
        let parts = parts_with_auth(Some("Basic dXNlcjpwYXNz"));
        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn test_empty_token_rejected() {
        let parts = parts_with_auth(Some("Bearer "));
        assert_eq!(bearer_token(&parts), None);
    }
}
