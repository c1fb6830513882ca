//! User domain types.
//!
//! These types represent validated domain objects separate from database row types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use clearcart_core::{Email, FileId, UserId};

/// A storefront user (domain type).
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// User's email address (unique login handle).
    pub email: Email,
    /// Reference to the current avatar blob, if one has been uploaded.
    pub avatar_file_id: Option<FileId>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// JSON projection of a user returned by the API.
///
/// Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub avatar_file_id: Option<FileId>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            avatar_file_id: user.avatar_file_id,
        }
    }
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            avatar_file_id: user.avatar_file_id,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_serializes_camel_case_without_password() {
        let user = User {
            id: UserId::new(1),
            name: "Test Buyer".to_string(),
            email: Email::parse("buyer@example.com").unwrap(),
            avatar_file_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(UserProfile::from(&user)).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Test Buyer");
        assert_eq!(json["email"], "buyer@example.com");
        assert!(json["avatarFileId"].is_null());
        assert!(json.get("password").is_none());
    }
}
