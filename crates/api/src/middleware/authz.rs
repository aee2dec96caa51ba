//! Role authorization helpers.
//!
//! The access token carries no role claim. Every protected write re-reads the
//! caller's role from the users table, so a role change made by an admin
//! takes effect on the very next request instead of at token expiry.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::AppState;
use cashup_db::{UserRepository, entities::sea_orm_active_enums::UserRole};

/// Re-reads the caller's current role from the database.
///
/// A valid token whose user row no longer exists resolves to `Reader`, which
/// denies every write while leaving read endpoints to their own handling.
///
/// # Errors
///
/// Returns a ready-made 500 response if the lookup fails.
pub async fn current_role(state: &AppState, user_id: i32) -> Result<UserRole, Response> {
    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.role_of(user_id).await {
        Ok(role) => Ok(role.unwrap_or(UserRole::Reader)),
        Err(e) => {
            error!(error = %e, user_id, "Database error resolving role");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred"
                })),
            )
                .into_response())
        }
    }
}

/// Requires the caller's current role to allow record writes.
///
/// # Errors
///
/// Returns a ready-made 403 (or 500 on lookup failure) response.
pub async fn require_writer(state: &AppState, user_id: i32) -> Result<(), Response> {
    let role = current_role(state, user_id).await?;

    if role.can_write() {
        Ok(())
    } else {
        Err(forbidden())
    }
}

/// Requires the caller's current role to be admin.
///
/// # Errors
///
/// Returns a ready-made 403 (or 500 on lookup failure) response.
pub async fn require_admin(state: &AppState, user_id: i32) -> Result<(), Response> {
    let role = current_role(state, user_id).await?;

    if role.is_admin() {
        Ok(())
    } else {
        Err(forbidden())
    }
}

fn forbidden() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "error": "forbidden",
            "message": "Insufficient role for this operation"
        })),
    )
        .into_response()
}
