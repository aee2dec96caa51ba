//! Smart-safe withdrawal routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::{AppState, middleware::AuthUser, middleware::authz::require_writer};
use cashup_db::{
    SafeWithdrawalRepository,
    entities::safe_withdrawals,
    repositories::{CreateSafeWithdrawalInput, UpdateSafeWithdrawalInput},
};

/// Creates the safe withdrawal routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/safe-withdrawals",
            get(list_withdrawals).post(create_withdrawal),
        )
        .route(
            "/safe-withdrawals/{id}",
            get(get_withdrawal)
                .put(update_withdrawal)
                .delete(delete_withdrawal),
        )
}

/// Query parameters for listing withdrawals.
#[derive(Debug, Deserialize)]
pub struct ListWithdrawalsQuery {
    /// Filter by counting date range start (YYYY-MM-DD).
    pub from: Option<NaiveDate>,
    /// Filter by counting date range end (YYYY-MM-DD).
    pub to: Option<NaiveDate>,
}

/// Request body for creating a withdrawal record.
#[derive(Debug, Deserialize)]
pub struct CreateWithdrawalRequest {
    /// Store the smart safe belongs to.
    pub store_id: i32,
    /// Store display alias.
    pub store_alias: Option<String>,
    /// Security envelope code.
    pub envelope_code: Option<String>,
    /// Counted amount.
    pub amount: Option<Decimal>,
    /// Difference against the expected amount.
    pub difference: Option<Decimal>,
    /// Counted coins.
    pub coins: Option<Decimal>,
    /// Withdrawal instant.
    pub withdrawal_at: Option<DateTime<Utc>>,
    /// Courier pickup date.
    pub courier_date: Option<NaiveDate>,
    /// Import instant for machine-fed rows.
    pub imported_at: Option<DateTime<Utc>>,
    /// Counting instant.
    pub counted_at: Option<DateTime<Utc>>,
    /// Operator who counted.
    pub counted_by: Option<String>,
    /// Counting day.
    pub counting_date: Option<NaiveDate>,
    /// Counting time of day.
    pub counting_time: Option<String>,
    /// Total.
    pub total: Option<Decimal>,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Request body for updating a withdrawal record. Omitted fields stay unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateWithdrawalRequest {
    /// New store id.
    pub store_id: Option<i32>,
    /// New store alias.
    pub store_alias: Option<String>,
    /// New envelope code.
    pub envelope_code: Option<String>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New difference.
    pub difference: Option<Decimal>,
    /// New coins.
    pub coins: Option<Decimal>,
    /// New withdrawal instant.
    pub withdrawal_at: Option<DateTime<Utc>>,
    /// New courier date.
    pub courier_date: Option<NaiveDate>,
    /// New import instant.
    pub imported_at: Option<DateTime<Utc>>,
    /// New counting instant.
    pub counted_at: Option<DateTime<Utc>>,
    /// New counting operator.
    pub counted_by: Option<String>,
    /// New counting day.
    pub counting_date: Option<NaiveDate>,
    /// New counting time.
    pub counting_time: Option<String>,
    /// New total.
    pub total: Option<Decimal>,
    /// New notes.
    pub notes: Option<String>,
}

/// Response for a withdrawal record.
#[derive(Debug, Serialize)]
pub struct WithdrawalResponse {
    /// Record ID.
    pub id: i32,
    /// Store id.
    pub store_id: i32,
    /// Store alias.
    pub store_alias: Option<String>,
    /// Security envelope code.
    pub envelope_code: Option<String>,
    /// Counted amount.
    pub amount: Option<Decimal>,
    /// Difference.
    pub difference: Option<Decimal>,
    /// Coins.
    pub coins: Option<Decimal>,
    /// Withdrawal instant.
    pub withdrawal_at: Option<DateTime<Utc>>,
    /// Courier date.
    pub courier_date: Option<NaiveDate>,
    /// Import instant.
    pub imported_at: Option<DateTime<Utc>>,
    /// Counting instant.
    pub counted_at: Option<DateTime<Utc>>,
    /// Counting operator.
    pub counted_by: Option<String>,
    /// Counting day.
    pub counting_date: Option<NaiveDate>,
    /// Counting time.
    pub counting_time: Option<String>,
    /// Total.
    pub total: Option<Decimal>,
    /// Notes.
    pub notes: Option<String>,
}

impl From<safe_withdrawals::Model> for WithdrawalResponse {
    fn from(model: safe_withdrawals::Model) -> Self {
        Self {
            id: model.id,
            store_id: model.store_id,
            store_alias: model.store_alias,
            envelope_code: model.envelope_code,
            amount: model.amount,
            difference: model.difference,
            coins: model.coins,
            withdrawal_at: model.withdrawal_at.map(|t| t.with_timezone(&Utc)),
            courier_date: model.courier_date,
            imported_at: model.imported_at.map(|t| t.with_timezone(&Utc)),
            counted_at: model.counted_at.map(|t| t.with_timezone(&Utc)),
            counted_by: model.counted_by,
            counting_date: model.counting_date,
            counting_time: model.counting_time,
            total: model.total,
            notes: model.notes,
        }
    }
}

/// GET /safe-withdrawals - List withdrawal records.
async fn list_withdrawals(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListWithdrawalsQuery>,
) -> impl IntoResponse {
    let repo = SafeWithdrawalRepository::new((*state.db).clone());

    match repo.list(query.from, query.to).await {
        Ok(records) => {
            let records: Vec<WithdrawalResponse> =
                records.into_iter().map(WithdrawalResponse::from).collect();
            (StatusCode::OK, Json(records)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Database error listing safe withdrawals");
            internal_error()
        }
    }
}

/// GET /safe-withdrawals/{id} - Get a withdrawal record.
async fn get_withdrawal(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let repo = SafeWithdrawalRepository::new((*state.db).clone());

    match repo.find_by_id(id).await {
        Ok(Some(record)) => {
            (StatusCode::OK, Json(WithdrawalResponse::from(record))).into_response()
        }
        Ok(None) => not_found(),
        Err(e) => {
            error!(error = %e, "Database error loading safe withdrawal");
            internal_error()
        }
    }
}

/// POST /safe-withdrawals - Record a withdrawal.
async fn create_withdrawal(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateWithdrawalRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_writer(&state, auth.user_id()).await {
        return response;
    }

    let repo = SafeWithdrawalRepository::new((*state.db).clone());
    let input = CreateSafeWithdrawalInput {
        store_id: payload.store_id,
        store_alias: payload.store_alias,
        envelope_code: payload.envelope_code,
        amount: payload.amount,
        difference: payload.difference,
        coins: payload.coins,
        withdrawal_at: payload.withdrawal_at,
        courier_date: payload.courier_date,
        imported_at: payload.imported_at,
        counted_at: payload.counted_at,
        counted_by: payload.counted_by,
        counting_date: payload.counting_date,
        counting_time: payload.counting_time,
        total: payload.total,
        notes: payload.notes,
    };

    match repo.create(input).await {
        Ok(record) => {
            info!(record_id = %record.id, user_id = %auth.user_id(), "Safe withdrawal created");
            (StatusCode::CREATED, Json(WithdrawalResponse::from(record))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create safe withdrawal");
            internal_error()
        }
    }
}

/// PUT /safe-withdrawals/{id} - Update a withdrawal record.
async fn update_withdrawal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateWithdrawalRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_writer(&state, auth.user_id()).await {
        return response;
    }

    let repo = SafeWithdrawalRepository::new((*state.db).clone());
    let input = UpdateSafeWithdrawalInput {
        store_id: payload.store_id,
        store_alias: payload.store_alias,
        envelope_code: payload.envelope_code,
        amount: payload.amount,
        difference: payload.difference,
        coins: payload.coins,
        withdrawal_at: payload.withdrawal_at,
        courier_date: payload.courier_date,
        imported_at: payload.imported_at,
        counted_at: payload.counted_at,
        counted_by: payload.counted_by,
        counting_date: payload.counting_date,
        counting_time: payload.counting_time,
        total: payload.total,
        notes: payload.notes,
    };

    match repo.update(id, input).await {
        Ok(Some(_)) => StatusCode::NO_CONTENT.into_response(),
        Ok(None) => not_found(),
        Err(e) => {
            error!(error = %e, "Failed to update safe withdrawal");
            internal_error()
        }
    }
}

/// DELETE /safe-withdrawals/{id} - Delete a withdrawal record.
async fn delete_withdrawal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    if let Err(response) = require_writer(&state, auth.user_id()).await {
        return response;
    }

    let repo = SafeWithdrawalRepository::new((*state.db).clone());
    match repo.delete(id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => not_found(),
        Err(e) => {
            error!(error = %e, "Failed to delete safe withdrawal");
            internal_error()
        }
    }
}

fn not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": "Safe withdrawal not found"
        })),
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
