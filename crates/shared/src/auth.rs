//! Authentication types for JWT and tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// JWT claims for access tokens.
///
/// Deliberately carries no role: authorization re-reads the user's current
/// role from the database on every protected write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: i32,
    /// Username.
    pub name: String,
    /// User email.
    pub email: String,
    /// Unique token ID.
    pub jti: Uuid,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
    /// Token issuer.
    pub iss: String,
    /// Token audience.
    pub aud: String,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(
        user_id: i32,
        username: &str,
        email: &str,
        issuer: &str,
        audience: &str,
        expires_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            name: username.to_string(),
            email: email.to_string(),
            jti: Uuid::new_v4(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> i32 {
        self.sub
    }
}

/// Registration request payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username.
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,
    /// User email.
    #[validate(
        email(message = "Invalid email address"),
        length(max = 100, message = "Email must be at most 100 characters")
    )]
    pub email: String,
    /// User password (complexity checked separately at the boundary).
    pub password: String,
}

/// Login request payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// User email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// User password.
    pub password: String,
}

/// Refresh token request.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshRequest {
    /// The refresh token.
    pub refresh_token: String,
}

/// Logout request.
#[derive(Debug, Clone, Deserialize)]
pub struct LogoutRequest {
    /// The refresh token to revoke.
    pub refresh_token: String,
}

/// Response returned by register, login, and refresh.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    /// Authenticated user info.
    pub user: UserInfo,
    /// Access token (short-lived JWT).
    pub access_token: String,
    /// Refresh token (long-lived, opaque).
    pub refresh_token: String,
    /// Access token expiration instant.
    pub expires_at: DateTime<Utc>,
}

/// Public user info returned in auth responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    /// User ID.
    pub id: i32,
    /// Username.
    pub username: String,
    /// User email.
    pub email: String,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Full user record for admin user management.
#[derive(Debug, Clone, Serialize)]
pub struct UserDetail {
    /// User ID.
    pub id: i32,
    /// Username.
    pub username: String,
    /// User email.
    pub email: String,
    /// User role.
    pub role: String,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Admin create-user request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Username.
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,
    /// Email.
    #[validate(
        email(message = "Invalid email address"),
        length(max = 100, message = "Email must be at most 100 characters")
    )]
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Role to assign (defaults to reader).
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "reader".to_string()
}

/// Admin update-user request. All fields optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New username.
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: Option<String>,
    /// New email.
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    /// New password.
    pub password: Option<String>,
    /// New role.
    pub role: Option<String>,
}
