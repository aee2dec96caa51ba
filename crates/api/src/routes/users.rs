//! User management routes (admin only).

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use serde_json::json;
use tracing::{error, info};
use validator::Validate;

use crate::{AppState, middleware::AuthUser, middleware::authz::require_admin};
use cashup_core::auth::{hash_password, validate_password_complexity};
use cashup_db::{
    UserRepository,
    entities::{sea_orm_active_enums::UserRole, users},
    repositories::UpdateUserInput,
};
use cashup_shared::auth::{CreateUserRequest, UpdateUserRequest, UserDetail};

/// Creates the user management router (requires auth middleware to be applied
/// externally; every handler additionally requires the admin role).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

fn to_detail(user: users::Model) -> UserDetail {
    UserDetail {
        id: user.id,
        username: user.username,
        email: user.email,
        role: user.role.as_str().to_string(),
        created_at: user.created_at.with_timezone(&Utc),
        updated_at: user.updated_at.with_timezone(&Utc),
    }
}

/// GET /users - List all users.
async fn list_users(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(response) = require_admin(&state, auth.user_id()).await {
        return response;
    }

    let user_repo = UserRepository::new((*state.db).clone());
    match user_repo.list_all().await {
        Ok(users) => {
            let users: Vec<UserDetail> = users.into_iter().map(to_detail).collect();
            (StatusCode::OK, Json(users)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Database error listing users");
            internal_error()
        }
    }
}

/// GET /users/{id} - Get a single user.
async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&state, auth.user_id()).await {
        return response;
    }

    let user_repo = UserRepository::new((*state.db).clone());
    match user_repo.find_by_id(id).await {
        Ok(Some(user)) => (StatusCode::OK, Json(to_detail(user))).into_response(),
        Ok(None) => user_not_found(),
        Err(e) => {
            error!(error = %e, "Database error loading user");
            internal_error()
        }
    }
}

/// POST /users - Create a user with an explicit role.
async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateUserRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&state, auth.user_id()).await {
        return response;
    }

    if let Err(e) = payload.validate() {
        return validation_error(&e.to_string());
    }
    if let Err(e) = validate_password_complexity(&payload.password) {
        return validation_error(&e.to_string());
    }
    let Some(role) = UserRole::from_name(&payload.role) else {
        return validation_error("Role must be one of reader, writer, admin");
    };

    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.email_exists(&payload.email).await {
        Ok(true) => {
            return (
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "email_exists",
                    "message": "An account with this email already exists"
                })),
            )
                .into_response();
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Database error checking email");
            return internal_error();
        }
    }

    match user_repo.username_exists(&payload.username).await {
        Ok(true) => {
            return (
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "username_exists",
                    "message": "This username is already taken"
                })),
            )
                .into_response();
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Database error checking username");
            return internal_error();
        }
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return internal_error();
        }
    };

    match user_repo
        .create(&payload.username, &payload.email, &password_hash, role)
        .await
    {
        Ok(user) => {
            info!(user_id = %user.id, created_by = %auth.user_id(), "User created by admin");
            (StatusCode::CREATED, Json(to_detail(user))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create user");
            internal_error()
        }
    }
}

/// PUT /users/{id} - Update a user's profile, password, or role.
async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUserRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&state, auth.user_id()).await {
        return response;
    }

    if let Err(e) = payload.validate() {
        return validation_error(&e.to_string());
    }

    let role = match payload.role.as_deref() {
        Some(name) => match UserRole::from_name(name) {
            Some(role) => Some(role),
            None => return validation_error("Role must be one of reader, writer, admin"),
        },
        None => None,
    };

    let user_repo = UserRepository::new((*state.db).clone());

    if let Some(username) = payload.username.as_deref() {
        match user_repo.username_taken_by_other(username, id).await {
            Ok(true) => {
                return (
                    StatusCode::CONFLICT,
                    Json(json!({
                        "error": "username_exists",
                        "message": "This username is already taken"
                    })),
                )
                    .into_response();
            }
            Ok(false) => {}
            Err(e) => {
                error!(error = %e, "Database error checking username");
                return internal_error();
            }
        }
    }

    if let Some(email) = payload.email.as_deref() {
        match user_repo.email_taken_by_other(email, id).await {
            Ok(true) => {
                return (
                    StatusCode::CONFLICT,
                    Json(json!({
                        "error": "email_exists",
                        "message": "An account with this email already exists"
                    })),
                )
                    .into_response();
            }
            Ok(false) => {}
            Err(e) => {
                error!(error = %e, "Database error checking email");
                return internal_error();
            }
        }
    }

    let password_hash = match payload.password.as_deref() {
        Some(password) => {
            if let Err(e) = validate_password_complexity(password) {
                return validation_error(&e.to_string());
            }
            match hash_password(password) {
                Ok(h) => Some(h),
                Err(e) => {
                    error!(error = %e, "Failed to hash password");
                    return internal_error();
                }
            }
        }
        None => None,
    };

    let input = UpdateUserInput {
        username: payload.username,
        email: payload.email,
        password_hash,
        role,
    };

    match user_repo.update(id, input).await {
        Ok(Some(_)) => {
            info!(user_id = %id, updated_by = %auth.user_id(), "User updated by admin");
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(None) => user_not_found(),
        Err(e) => {
            error!(error = %e, "Failed to update user");
            internal_error()
        }
    }
}

/// DELETE /users/{id} - Delete a user.
///
/// Self-deletion is rejected even for admins, so the system cannot lose its
/// last administrator to a stray click.
async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&state, auth.user_id()).await {
        return response;
    }

    if id == auth.user_id() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "self_delete",
                "message": "Cannot delete your own account"
            })),
        )
            .into_response();
    }

    let user_repo = UserRepository::new((*state.db).clone());
    match user_repo.delete(id).await {
        Ok(true) => {
            info!(user_id = %id, deleted_by = %auth.user_id(), "User deleted by admin");
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => user_not_found(),
        Err(e) => {
            error!(error = %e, "Failed to delete user");
            internal_error()
        }
    }
}

fn user_not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "user_not_found",
            "message": "User not found"
        })),
    )
        .into_response()
}

fn validation_error(message: &str) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "validation_error", "message": message })),
    )
        .into_response()
}

fn internal_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": "An error occurred"
        })),
    )
        .into_response()
}
