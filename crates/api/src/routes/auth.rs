//! Authentication routes: register, login, refresh, me, logout.
//!
//! Access tokens are stateless and short-lived; refresh tokens are opaque,
//! persisted, and rotated on every use so a consumed token cannot be
//! replayed.

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get,
    routing::post,
};
use chrono::{Duration, Utc};
use serde_json::json;
use tracing::{error, info, warn};
use validator::Validate;

use crate::{AppState, middleware::AuthUser};
use cashup_core::auth::{hash_password, validate_password_complexity, verify_password};
use cashup_db::{
    RefreshTokenRepository, UserRepository, entities::sea_orm_active_enums::UserRole,
    entities::users,
};
use cashup_shared::auth::{
    AuthResponse, LoginRequest, LogoutRequest, RefreshRequest, RegisterRequest, UserInfo,
};

/// Creates the public auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

/// Creates the auth routes that require a valid access token.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(me))
        .route("/auth/logout", post(logout))
}

/// Builds the token-pair response for a freshly authenticated user.
///
/// Issues the access token, generates and persists an opaque refresh token,
/// and assembles the public user info. Any failure is an internal error: the
/// caller has already been authenticated at this point.
async fn issue_token_pair(
    state: &AppState,
    user: &users::Model,
) -> Result<AuthResponse, &'static str> {
    let access_token = state
        .jwt_service
        .generate_access_token(user.id, &user.username, &user.email)
        .map_err(|e| {
            error!(error = %e, "Failed to generate access token");
            "access token generation failed"
        })?;

    let refresh_token = RefreshTokenRepository::new_token();
    let token_repo = RefreshTokenRepository::new((*state.db).clone());
    let expires = Utc::now() + Duration::days(state.jwt_service.refresh_token_expires_days());
    token_repo
        .create(user.id, &refresh_token, expires)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to persist refresh token");
            "refresh token persistence failed"
        })?;

    Ok(AuthResponse {
        user: UserInfo {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: user.created_at.with_timezone(&Utc),
        },
        access_token,
        refresh_token,
        expires_at: Utc::now()
            + Duration::minutes(state.jwt_service.access_token_expires_minutes()),
    })
}

/// POST /auth/register - Register a new user.
#[allow(clippy::too_many_lines)]
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "validation_error", "message": e.to_string() })),
        )
            .into_response();
    }

    if let Err(e) = validate_password_complexity(&payload.password) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "validation_error", "message": e.to_string() })),
        )
            .into_response();
    }

    let user_repo = UserRepository::new((*state.db).clone());

    // Two independent uniqueness probes so the caller can tell which
    // credential collided
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
            return internal_error("An error occurred during registration");
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
            return internal_error("An error occurred during registration");
        }
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return internal_error("An error occurred during registration");
        }
    };

    let user = match user_repo
        .create(
            &payload.username,
            &payload.email,
            &password_hash,
            UserRole::Reader,
        )
        .await
    {
        Ok(u) => u,
        Err(e) => {
            error!(error = %e, "Failed to create user");
            return internal_error("An error occurred during registration");
        }
    };

    info!(user_id = %user.id, username = %user.username, "New user registered");

    match issue_token_pair(&state, &user).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(_) => internal_error("An error occurred during registration"),
    }
}

/// POST /auth/login - Authenticate user and return tokens.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    // Unknown email and wrong password share one response so callers cannot
    // probe which accounts exist
    let user = match user_repo.find_by_email(&payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!(email = %payload.email, "Login attempt for non-existent user");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return internal_error("An error occurred during login");
        }
    };

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Failed login attempt - invalid password");
            return invalid_credentials();
        }
        Err(e) => {
            // A malformed stored hash reads as a failed match, not a 500
            warn!(user_id = %user.id, error = %e, "Password verification error");
            return invalid_credentials();
        }
    }

    info!(user_id = %user.id, "User logged in successfully");

    // A fresh pair per login; other active sessions stay valid
    match issue_token_pair(&state, &user).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(_) => internal_error("An error occurred during login"),
    }
}

/// POST /auth/refresh - Rotate a refresh token into a new token pair.
async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> impl IntoResponse {
    let token_repo = RefreshTokenRepository::new((*state.db).clone());

    // Missing, revoked, and expired tokens all get the same answer
    let token = match token_repo.find_by_token(&payload.refresh_token).await {
        Ok(Some(t)) => t,
        Ok(None) => return invalid_refresh_token(),
        Err(e) => {
            error!(error = %e, "Database error during token refresh");
            return internal_error("An error occurred during token refresh");
        }
    };

    if !token.is_active() {
        return invalid_refresh_token();
    }

    let user_repo = UserRepository::new((*state.db).clone());
    let user = match user_repo.find_by_id(token.user_id).await {
        Ok(Some(u)) => u,
        Ok(None) => return invalid_refresh_token(),
        Err(e) => {
            error!(error = %e, "Database error during token refresh");
            return internal_error("An error occurred during token refresh");
        }
    };

    // Single-use rotation: retire the presented token, persist a replacement.
    // A concurrent refresh that already consumed the token gets 401; an
    // insert failure after the revoke is surfaced as a fatal error rather
    // than silently retried.
    let expires = Utc::now() + Duration::days(state.jwt_service.refresh_token_expires_days());
    let (_, new_refresh_token) = match token_repo.rotate(token.id, user.id, expires).await {
        Ok(Some(pair)) => pair,
        Ok(None) => return invalid_refresh_token(),
        Err(e) => {
            error!(error = %e, user_id = %user.id, "Refresh token rotation failed");
            return internal_error("An error occurred during token refresh");
        }
    };

    let access_token = match state
        .jwt_service
        .generate_access_token(user.id, &user.username, &user.email)
    {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate access token");
            return internal_error("An error occurred during token refresh");
        }
    };

    info!(user_id = %user.id, "Refresh token rotated");

    let response = AuthResponse {
        user: UserInfo {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at.with_timezone(&Utc),
        },
        access_token,
        refresh_token: new_refresh_token,
        expires_at: Utc::now()
            + Duration::minutes(state.jwt_service.access_token_expires_minutes()),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// GET /auth/me - Return the authenticated user's public info.
async fn me(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    // The token outlives the row if the user was deleted after issuance
    match user_repo.find_by_id(auth.user_id()).await {
        Ok(Some(user)) => (
            StatusCode::OK,
            Json(json!({
                "id": user.id,
                "username": user.username,
                "email": user.email,
                "created_at": user.created_at.with_timezone(&Utc)
            })),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "user_not_found",
                "message": "User not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error loading current user");
            internal_error("An error occurred")
        }
    }
}

/// POST /auth/logout - Revoke a refresh token.
///
/// Idempotent: revoking an unknown or already-revoked token still succeeds,
/// so the response leaks nothing about which tokens exist.
async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<LogoutRequest>,
) -> impl IntoResponse {
    let token_repo = RefreshTokenRepository::new((*state.db).clone());

    match token_repo.revoke_by_token(&payload.refresh_token).await {
        Ok(revoked) => {
            info!(user_id = %auth.user_id(), revoked, "User logged out");
            (
                StatusCode::OK,
                Json(json!({ "message": "Logged out successfully" })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Database error during logout");
            internal_error("An error occurred during logout")
        }
    }
}

fn invalid_credentials() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "invalid_credentials",
            "message": "Invalid email or password"
        })),
    )
        .into_response()
}

fn invalid_refresh_token() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "invalid_token",
            "message": "Invalid or expired refresh token"
        })),
    )
        .into_response()
}

fn internal_error(message: &str) -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "internal_error", "message": message })),
    )
        .into_response()
}
