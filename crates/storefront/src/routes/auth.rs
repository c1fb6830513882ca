//! Authentication route handlers.
//!
//! JSON API endpoints for signup and login. Both return the public user
//! profile together with a fresh session token.

use axum::{Json, extract::State, http::StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::{Result, set_sentry_user};
use crate::extract::AppJson;
use crate::models::UserProfile;
use crate::services::AuthService;
use crate::state::AppState;

/// Signup request body.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: SecretString,
}

/// Response for both signup and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserProfile,
    pub token: String,
}

/// Register a new user.
///
/// POST /api/auth/signup
///
/// # Errors
///
/// Returns 400 for validation failures (missing fields, invalid email,
/// short password, duplicate email).
pub async fn signup(
    State(state): State<AppState>,
    AppJson(req): AppJson<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let auth = AuthService::new(state.pool(), state.tokens());

    let session = auth
        .register(&req.name, &req.email, req.password.expose_secret())
        .await?;

    tracing::info!(user_id = %session.user.id, "user registered");
    set_sentry_user(&session.user.id, Some(session.user.email.as_str()));

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully".to_string(),
            user: UserProfile::from(&session.user),
            token: session.token,
        }),
    ))
}

/// Login with email and password.
///
/// POST /api/auth/login
///
/// # Errors
///
/// Returns 401 for a wrong email or password; the two cases are not
/// distinguishable from the response.
pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let auth = AuthService::new(state.pool(), state.tokens());

    let session = auth
        .login(&req.email, req.password.expose_secret())
        .await?;

    tracing::info!(user_id = %session.user.id, "user logged in");
    set_sentry_user(&session.user.id, Some(session.user.email.as_str()));

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        user: UserProfile::from(&session.user),
        token: session.token,
    }))
}
