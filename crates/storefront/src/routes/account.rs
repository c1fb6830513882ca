//! Account route handlers.
//!
//! These routes require authentication.

use axum::{Json, extract::{Multipart, State}};
use chrono::Utc;
use serde::Serialize;

use crate::error::Result;
use crate::middleware::auth::RequireAuth;
use crate::models::UserProfile;
use crate::routes::files::read_image_field;
use crate::services::AuthService;
use crate::state::AppState;
use crate::storage::FileMetadata;

/// Response from an avatar update.
#[derive(Debug, Serialize)]
pub struct AvatarResponse {
    pub message: String,
    pub user: UserProfile,
}

/// Replace the current user's avatar.
///
/// PUT /api/user/avatar (multipart, field `avatar`)
///
/// The new image is stored before the user record is repointed, and the
/// old blob is deleted only after the swap. A failure partway through
/// leaves the user with a working avatar; at worst an orphaned blob
/// remains, which is preferable to a dangling reference.
///
/// # Errors
///
/// Returns 400 for a missing/invalid/oversized image and 404 if the
/// account no longer exists.
pub async fn update_avatar(
    State(state): State<AppState>,
    RequireAuth(current_user): RequireAuth,
    mut multipart: Multipart,
) -> Result<Json<AvatarResponse>> {
    let file =
        read_image_field(&mut multipart, "avatar", state.config().max_avatar_bytes).await?;

    let auth = AuthService::new(state.pool(), state.tokens());
    let user = auth.get_user(current_user.user_id).await?;
    let old_avatar = user.avatar_file_id;

    let filename = format!(
        "avatar_{}_{}_{}",
        user.id,
        Utc::now().timestamp_millis(),
        file.filename
    );

    let stored = state
        .files()
        .put(
            &file.bytes,
            &filename,
            &file.content_type,
            FileMetadata {
                folder: Some("avatars".to_string()),
                owner: Some(user.id),
                original_name: Some(file.filename.clone()),
            },
        )
        .await?;

    let user = crate::db::users::UserRepository::new(state.pool())
        .set_avatar_file(user.id, stored.id)
        .await?;

    // The swap is already visible; a failed cleanup only orphans a blob.
    if let Some(old_id) = old_avatar {
        if let Err(e) = state.files().delete(old_id).await {
            tracing::warn!(file_id = %old_id, error = %e, "failed to delete old avatar");
        }
    }

    tracing::info!(user_id = %user.id, file_id = %stored.id, "avatar updated");

    Ok(Json(AvatarResponse {
        message: "Avatar updated successfully".to_string(),
        user: UserProfile::from(user),
    }))
}
