//! Sealed cash envelope routes.
//!
//! Envelopes are per-user: every query is scoped to the caller, so one
//! operator never sees another operator's envelopes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::{AppState, middleware::AuthUser, middleware::authz::require_writer};
use cashup_db::{
    EnvelopeRepository,
    entities::envelopes,
    repositories::{CreateEnvelopeInput, UpdateEnvelopeInput},
};

/// Creates the envelope routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/envelopes", get(list_envelopes).post(create_envelope))
        .route(
            "/envelopes/{id}",
            get(get_envelope)
                .put(update_envelope)
                .delete(delete_envelope),
        )
        .route("/envelopes/{id}/duplicate", post(duplicate_envelope))
}

/// Query parameters for listing envelopes.
#[derive(Debug, Deserialize)]
pub struct ListEnvelopesQuery {
    /// Filter by reference date range start (YYYY-MM-DD).
    pub from: Option<NaiveDate>,
    /// Filter by reference date range end (YYYY-MM-DD).
    pub to: Option<NaiveDate>,
}

/// Request body for creating an envelope.
#[derive(Debug, Deserialize)]
pub struct CreateEnvelopeRequest {
    /// Business day the envelope accounts for.
    pub reference_date: NaiveDate,
    /// When the envelope was sealed.
    pub closed_at: Option<DateTime<Utc>>,
    /// When the envelope was collected.
    pub collected_at: Option<DateTime<Utc>>,
    /// Seal code.
    pub seal_code: Option<String>,
    /// Counted total.
    pub total: Decimal,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Operator who sealed the envelope.
    pub closed_by: Option<String>,
    /// Operator who handed it over.
    pub collected_by: Option<String>,
}

/// Request body for updating an envelope. Omitted fields stay unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateEnvelopeRequest {
    /// New reference date.
    pub reference_date: Option<NaiveDate>,
    /// New closing instant.
    pub closed_at: Option<DateTime<Utc>>,
    /// New collection instant.
    pub collected_at: Option<DateTime<Utc>>,
    /// New seal code.
    pub seal_code: Option<String>,
    /// New total.
    pub total: Option<Decimal>,
    /// New notes.
    pub notes: Option<String>,
    /// New closing operator.
    pub closed_by: Option<String>,
    /// New collection operator.
    pub collected_by: Option<String>,
}

/// Response for an envelope.
#[derive(Debug, Serialize)]
pub struct EnvelopeResponse {
    /// Envelope ID.
    pub id: i32,
    /// Business day.
    pub reference_date: NaiveDate,
    /// Closing instant.
    pub closed_at: Option<DateTime<Utc>>,
    /// Collection instant.
    pub collected_at: Option<DateTime<Utc>>,
    /// Seal code.
    pub seal_code: Option<String>,
    /// Counted total.
    pub total: Decimal,
    /// Notes.
    pub notes: Option<String>,
    /// Closing operator.
    pub closed_by: Option<String>,
    /// Collection operator.
    pub collected_by: Option<String>,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Row update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
    /// Owning user.
    pub user_id: i32,
}

impl From<envelopes::Model> for EnvelopeResponse {
    fn from(model: envelopes::Model) -> Self {
        Self {
            id: model.id,
            reference_date: model.reference_date,
            closed_at: model.closed_at.map(|t| t.with_timezone(&Utc)),
            collected_at: model.collected_at.map(|t| t.with_timezone(&Utc)),
            seal_code: model.seal_code,
            total: model.total,
            notes: model.notes,
            closed_by: model.closed_by,
            collected_by: model.collected_by,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.map(|t| t.with_timezone(&Utc)),
            user_id: model.user_id,
        }
    }
}

/// GET /envelopes - List the caller's envelopes.
async fn list_envelopes(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListEnvelopesQuery>,
) -> impl IntoResponse {
    let repo = EnvelopeRepository::new((*state.db).clone());

    match repo.list(auth.user_id(), query.from, query.to).await {
        Ok(records) => {
            let records: Vec<EnvelopeResponse> =
                records.into_iter().map(EnvelopeResponse::from).collect();
            (StatusCode::OK, Json(records)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Database error listing envelopes");
            internal_error()
        }
    }
}

/// GET /envelopes/{id} - Get one of the caller's envelopes.
async fn get_envelope(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let repo = EnvelopeRepository::new((*state.db).clone());

    match repo.find_by_id(id, auth.user_id()).await {
        Ok(Some(record)) => {
            (StatusCode::OK, Json(EnvelopeResponse::from(record))).into_response()
        }
        Ok(None) => not_found(),
        Err(e) => {
            error!(error = %e, "Database error loading envelope");
            internal_error()
        }
    }
}

/// POST /envelopes - Record a new envelope.
async fn create_envelope(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateEnvelopeRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_writer(&state, auth.user_id()).await {
        return response;
    }

    let repo = EnvelopeRepository::new((*state.db).clone());
    let input = CreateEnvelopeInput {
        reference_date: payload.reference_date,
        closed_at: payload.closed_at,
        collected_at: payload.collected_at,
        seal_code: payload.seal_code,
        total: payload.total,
        notes: payload.notes,
        closed_by: payload.closed_by,
        collected_by: payload.collected_by,
    };

    match repo.create(auth.user_id(), input).await {
        Ok(record) => {
            info!(envelope_id = %record.id, user_id = %auth.user_id(), "Envelope created");
            (StatusCode::CREATED, Json(EnvelopeResponse::from(record))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create envelope");
            internal_error()
        }
    }
}

/// PUT /envelopes/{id} - Update one of the caller's envelopes.
async fn update_envelope(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateEnvelopeRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_writer(&state, auth.user_id()).await {
        return response;
    }

    let repo = EnvelopeRepository::new((*state.db).clone());
    let input = UpdateEnvelopeInput {
        reference_date: payload.reference_date,
        closed_at: payload.closed_at,
        collected_at: payload.collected_at,
        seal_code: payload.seal_code,
        total: payload.total,
        notes: payload.notes,
        closed_by: payload.closed_by,
        collected_by: payload.collected_by,
    };

    match repo.update(id, auth.user_id(), input).await {
        Ok(Some(_)) => StatusCode::NO_CONTENT.into_response(),
        Ok(None) => not_found(),
        Err(e) => {
            error!(error = %e, "Failed to update envelope");
            internal_error()
        }
    }
}

/// DELETE /envelopes/{id} - Delete one of the caller's envelopes.
async fn delete_envelope(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    if let Err(response) = require_writer(&state, auth.user_id()).await {
        return response;
    }

    let repo = EnvelopeRepository::new((*state.db).clone());
    match repo.delete(id, auth.user_id()).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => not_found(),
        Err(e) => {
            error!(error = %e, "Failed to delete envelope");
            internal_error()
        }
    }
}

/// POST /envelopes/{id}/duplicate - Copy an envelope into a fresh open one.
async fn duplicate_envelope(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    if let Err(response) = require_writer(&state, auth.user_id()).await {
        return response;
    }

    let repo = EnvelopeRepository::new((*state.db).clone());
    match repo.duplicate(id, auth.user_id()).await {
        Ok(Some(record)) => {
            info!(envelope_id = %record.id, user_id = %auth.user_id(), "Envelope duplicated");
            (StatusCode::CREATED, Json(EnvelopeResponse::from(record))).into_response()
        }
        Ok(None) => not_found(),
        Err(e) => {
            error!(error = %e, "Failed to duplicate envelope");
            internal_error()
        }
    }
}

fn not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": "Envelope not found"
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
