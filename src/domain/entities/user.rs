//! User entity and authentication payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// Role of an account on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Moderator,
    /// Regular member; also used for roles this client does not know
    #[default]
    #[serde(other)]
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Moderator => "MODERATOR",
            Self::User => "USER",
        }
    }

    /// Admins and moderators may manage other users' content.
    pub fn can_moderate(&self) -> bool {
        matches!(self, Self::Admin | Self::Moderator)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Profile of the logged-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,

    pub username: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,

    #[serde(default, deserialize_with = "crate::shared::nullable::null_as_default")]
    pub role: UserRole,

    #[serde(default, deserialize_with = "crate::shared::nullable::null_as_default")]
    pub email_verified: bool,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username or email is required"))]
    pub username_or_email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

/// Profile update request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 32, message = "Nickname must be 1-32 characters"))]
    pub nickname: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// Password change request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

/// Tokens and profile returned by a successful login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,

    #[serde(default)]
    pub refresh_token: Option<String>,

    pub user: User,
}

/// Token refresh payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshedToken {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_defaults_to_user() {
        let user: User = serde_json::from_value(json!({ "id": 1, "username": "kim" })).unwrap();
        assert_eq!(user.role, UserRole::User);
    }

    #[test]
    fn test_null_role_and_flags_use_defaults() {
        let user: User = serde_json::from_value(
            json!({ "id": 1, "username": "kim", "role": null, "emailVerified": null }),
        )
        .unwrap();
        assert_eq!(user.role, UserRole::User);
        assert!(!user.email_verified);
    }

    #[test]
    fn test_unknown_role_maps_to_user() {
        let user: User =
            serde_json::from_value(json!({ "id": 1, "username": "kim", "role": "GUEST" })).unwrap();
        assert_eq!(user.role, UserRole::User);
        assert!(!user.role.can_moderate());
    }

    #[test]
    fn test_moderator_role() {
        let role: UserRole = serde_json::from_value(json!("MODERATOR")).unwrap();
        assert!(role.can_moderate());
        assert_eq!(role.to_string(), "MODERATOR");
    }
}
