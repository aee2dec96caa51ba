//! Monetary reserve count routes.

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
    ReserveCountRepository,
    entities::reserve_counts,
    repositories::{CreateReserveCountInput, UpdateReserveCountInput},
};

/// Creates the reserve count routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reserve-counts", get(list_reserves).post(create_reserve))
        .route(
            "/reserve-counts/{id}",
            get(get_reserve).put(update_reserve).delete(delete_reserve),
        )
}

/// Query parameters for listing reserve counts.
#[derive(Debug, Deserialize)]
pub struct ListReservesQuery {
    /// Filter by counting date range start (YYYY-MM-DD).
    pub from: Option<NaiveDate>,
    /// Filter by counting date range end (YYYY-MM-DD).
    pub to: Option<NaiveDate>,
}

/// Request body for creating a reserve count.
#[derive(Debug, Deserialize)]
pub struct CreateReserveRequest {
    /// Store the reserve belongs to.
    pub store_id: i32,
    /// Counted amount.
    pub amount: Option<Decimal>,
    /// Coins portion.
    pub coins: Option<Decimal>,
    /// Total value of coins.
    pub coins_total: Option<Decimal>,
    /// Total value of banknotes.
    pub banknotes_total: Option<Decimal>,
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

/// Request body for updating a reserve count. Omitted fields stay unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateReserveRequest {
    /// New store id.
    pub store_id: Option<i32>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New coins portion.
    pub coins: Option<Decimal>,
    /// New coins total.
    pub coins_total: Option<Decimal>,
    /// New banknotes total.
    pub banknotes_total: Option<Decimal>,
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

/// Response for a reserve count.
#[derive(Debug, Serialize)]
pub struct ReserveResponse {
    /// Record ID.
    pub id: i32,
    /// Store id.
    pub store_id: i32,
    /// Amount.
    pub amount: Option<Decimal>,
    /// Coins.
    pub coins: Option<Decimal>,
    /// Coins total.
    pub coins_total: Option<Decimal>,
    /// Banknotes total.
    pub banknotes_total: Option<Decimal>,
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

impl From<reserve_counts::Model> for ReserveResponse {
    fn from(model: reserve_counts::Model) -> Self {
        Self {
            id: model.id,
            store_id: model.store_id,
            amount: model.amount,
            coins: model.coins,
            coins_total: model.coins_total,
            banknotes_total: model.banknotes_total,
            counted_at: model.counted_at.map(|t| t.with_timezone(&Utc)),
            counted_by: model.counted_by,
            counting_date: model.counting_date,
            counting_time: model.counting_time,
            total: model.total,
            notes: model.notes,
        }
    }
}

/// GET /reserve-counts - List reserve counts.
async fn list_reserves(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListReservesQuery>,
) -> impl IntoResponse {
    let repo = ReserveCountRepository::new((*state.db).clone());

    match repo.list(query.from, query.to).await {
        Ok(records) => {
            let records: Vec<ReserveResponse> =
                records.into_iter().map(ReserveResponse::from).collect();
            (StatusCode::OK, Json(records)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Database error listing reserve counts");
            internal_error()
        }
    }
}

/// GET /reserve-counts/{id} - Get a reserve count.
async fn get_reserve(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let repo = ReserveCountRepository::new((*state.db).clone());

    match repo.find_by_id(id).await {
        Ok(Some(record)) => (StatusCode::OK, Json(ReserveResponse::from(record))).into_response(),
        Ok(None) => not_found(),
        Err(e) => {
            error!(error = %e, "Database error loading reserve count");
            internal_error()
        }
    }
}

/// POST /reserve-counts - Record a reserve count.
async fn create_reserve(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateReserveRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_writer(&state, auth.user_id()).await {
        return response;
    }

    let repo = ReserveCountRepository::new((*state.db).clone());
    let input = CreateReserveCountInput {
        store_id: payload.store_id,
        amount: payload.amount,
        coins: payload.coins,
        coins_total: payload.coins_total,
        banknotes_total: payload.banknotes_total,
        counted_at: payload.counted_at,
        counted_by: payload.counted_by,
        counting_date: payload.counting_date,
        counting_time: payload.counting_time,
        total: payload.total,
        notes: payload.notes,
    };

    match repo.create(input).await {
        Ok(record) => {
            info!(record_id = %record.id, user_id = %auth.user_id(), "Reserve count created");
            (StatusCode::CREATED, Json(ReserveResponse::from(record))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create reserve count");
            internal_error()
        }
    }
}

/// PUT /reserve-counts/{id} - Update a reserve count.
async fn update_reserve(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateReserveRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_writer(&state, auth.user_id()).await {
        return response;
    }

    let repo = ReserveCountRepository::new((*state.db).clone());
    let input = UpdateReserveCountInput {
        store_id: payload.store_id,
        amount: payload.amount,
        coins: payload.coins,
        coins_total: payload.coins_total,
        banknotes_total: payload.banknotes_total,
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
            error!(error = %e, "Failed to update reserve count");
            internal_error()
        }
    }
}

/// DELETE /reserve-counts/{id} - Delete a reserve count.
async fn delete_reserve(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    if let Err(response) = require_writer(&state, auth.user_id()).await {
        return response;
    }

    let repo = ReserveCountRepository::new((*state.db).clone());
    match repo.delete(id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => not_found(),
        Err(e) => {
            error!(error = %e, "Failed to delete reserve count");
            internal_error()
        }
    }
}

fn not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": "Reserve count not found"
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
