//! Cash-drawer float routes.

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
    CashFloatRepository,
    entities::cash_floats,
    repositories::{CreateCashFloatInput, UpdateCashFloatInput},
};

/// Creates the cash float routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cash-floats", get(list_floats).post(create_float))
        .route(
            "/cash-floats/{id}",
            get(get_float).put(update_float).delete(delete_float),
        )
}

/// Query parameters for listing float counts.
#[derive(Debug, Deserialize)]
pub struct ListFloatsQuery {
    /// Filter by counting date range start (YYYY-MM-DD).
    pub from: Option<NaiveDate>,
    /// Filter by counting date range end (YYYY-MM-DD).
    pub to: Option<NaiveDate>,
}

/// Request body for creating a float count.
#[derive(Debug, Deserialize)]
pub struct CreateFloatRequest {
    /// Store the drawer belongs to.
    pub store_id: i32,
    /// Drawer code.
    pub drawer_code: Option<String>,
    /// Register the drawer sits in.
    pub register: Option<String>,
    /// Counted amount.
    pub amount: Option<Decimal>,
    /// Coins portion.
    pub coins: Option<Decimal>,
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

/// Request body for updating a float count. Omitted fields stay unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateFloatRequest {
    /// New store id.
    pub store_id: Option<i32>,
    /// New drawer code.
    pub drawer_code: Option<String>,
    /// New register.
    pub register: Option<String>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New coins portion.
    pub coins: Option<Decimal>,
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

/// Response for a float count.
#[derive(Debug, Serialize)]
pub struct FloatResponse {
    /// Record ID.
    pub id: i32,
    /// Store id.
    pub store_id: i32,
    /// Drawer code.
    pub drawer_code: Option<String>,
    /// Register.
    pub register: Option<String>,
    /// Amount.
    pub amount: Option<Decimal>,
    /// Coins.
    pub coins: Option<Decimal>,
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

impl From<cash_floats::Model> for FloatResponse {
    fn from(model: cash_floats::Model) -> Self {
        Self {
            id: model.id,
            store_id: model.store_id,
            drawer_code: model.drawer_code,
            register: model.register,
            amount: model.amount,
            coins: model.coins,
            counted_at: model.counted_at.map(|t| t.with_timezone(&Utc)),
            counted_by: model.counted_by,
            counting_date: model.counting_date,
            counting_time: model.counting_time,
            total: model.total,
            notes: model.notes,
        }
    }
}

/// GET /cash-floats - List float counts.
async fn list_floats(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListFloatsQuery>,
) -> impl IntoResponse {
    let repo = CashFloatRepository::new((*state.db).clone());

    match repo.list(query.from, query.to).await {
        Ok(records) => {
            let records: Vec<FloatResponse> =
                records.into_iter().map(FloatResponse::from).collect();
            (StatusCode::OK, Json(records)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Database error listing cash floats");
            internal_error()
        }
    }
}

/// GET /cash-floats/{id} - Get a float count.
async fn get_float(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let repo = CashFloatRepository::new((*state.db).clone());

    match repo.find_by_id(id).await {
        Ok(Some(record)) => (StatusCode::OK, Json(FloatResponse::from(record))).into_response(),
        Ok(None) => not_found(),
        Err(e) => {
            error!(error = %e, "Database error loading cash float");
            internal_error()
        }
    }
}

/// POST /cash-floats - Record a float count.
async fn create_float(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateFloatRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_writer(&state, auth.user_id()).await {
        return response;
    }

    let repo = CashFloatRepository::new((*state.db).clone());
    let input = CreateCashFloatInput {
        store_id: payload.store_id,
        drawer_code: payload.drawer_code,
        register: payload.register,
        amount: payload.amount,
        coins: payload.coins,
        counted_at: payload.counted_at,
        counted_by: payload.counted_by,
        counting_date: payload.counting_date,
        counting_time: payload.counting_time,
        total: payload.total,
        notes: payload.notes,
    };

    match repo.create(input).await {
        Ok(record) => {
            info!(record_id = %record.id, user_id = %auth.user_id(), "Cash float created");
            (StatusCode::CREATED, Json(FloatResponse::from(record))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create cash float");
            internal_error()
        }
    }
}

/// PUT /cash-floats/{id} - Update a float count.
async fn update_float(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateFloatRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_writer(&state, auth.user_id()).await {
        return response;
    }

    let repo = CashFloatRepository::new((*state.db).clone());
    let input = UpdateCashFloatInput {
        store_id: payload.store_id,
        drawer_code: payload.drawer_code,
        register: payload.register,
        amount: payload.amount,
        coins: payload.coins,
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
            error!(error = %e, "Failed to update cash float");
            internal_error()
        }
    }
}

/// DELETE /cash-floats/{id} - Delete a float count.
async fn delete_float(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    if let Err(response) = require_writer(&state, auth.user_id()).await {
        return response;
    }

    let repo = CashFloatRepository::new((*state.db).clone());
    match repo.delete(id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => not_found(),
        Err(e) => {
            error!(error = %e, "Failed to delete cash float");
            internal_error()
        }
    }
}

fn not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": "Cash float not found"
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
