//! Expense fund routes.

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
    ExpenseFundRepository,
    entities::expense_funds,
    repositories::{CreateExpenseFundInput, UpdateExpenseFundInput},
};

/// Creates the expense fund routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expense-funds", get(list_expenses).post(create_expense))
        .route(
            "/expense-funds/{id}",
            get(get_expense).put(update_expense).delete(delete_expense),
        )
}

/// Query parameters for listing expense records.
#[derive(Debug, Deserialize)]
pub struct ListExpensesQuery {
    /// Filter by counting date range start (YYYY-MM-DD).
    pub from: Option<NaiveDate>,
    /// Filter by counting date range end (YYYY-MM-DD).
    pub to: Option<NaiveDate>,
}

/// Request body for creating an expense record.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    /// Store the expense belongs to.
    pub store_id: i32,
    /// Expense category.
    pub expense_type: Option<String>,
    /// Amount taken from the fund.
    pub amount: Option<Decimal>,
    /// Coins portion.
    pub coins: Option<Decimal>,
    /// Invoice date.
    pub invoice_date: Option<NaiveDate>,
    /// Invoice number.
    pub invoice_number: Option<String>,
    /// Reason for the expense.
    pub reason: Option<String>,
    /// Supplier name.
    pub supplier: Option<String>,
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

/// Request body for updating an expense record. Omitted fields stay unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateExpenseRequest {
    /// New store id.
    pub store_id: Option<i32>,
    /// New category.
    pub expense_type: Option<String>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New coins portion.
    pub coins: Option<Decimal>,
    /// New invoice date.
    pub invoice_date: Option<NaiveDate>,
    /// New invoice number.
    pub invoice_number: Option<String>,
    /// New reason.
    pub reason: Option<String>,
    /// New supplier.
    pub supplier: Option<String>,
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

/// Response for an expense record.
#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    /// Record ID.
    pub id: i32,
    /// Store id.
    pub store_id: i32,
    /// Expense category.
    pub expense_type: Option<String>,
    /// Amount.
    pub amount: Option<Decimal>,
    /// Coins.
    pub coins: Option<Decimal>,
    /// Invoice date.
    pub invoice_date: Option<NaiveDate>,
    /// Invoice number.
    pub invoice_number: Option<String>,
    /// Reason.
    pub reason: Option<String>,
    /// Supplier.
    pub supplier: Option<String>,
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

impl From<expense_funds::Model> for ExpenseResponse {
    fn from(model: expense_funds::Model) -> Self {
        Self {
            id: model.id,
            store_id: model.store_id,
            expense_type: model.expense_type,
            amount: model.amount,
            coins: model.coins,
            invoice_date: model.invoice_date,
            invoice_number: model.invoice_number,
            reason: model.reason,
            supplier: model.supplier,
            counted_at: model.counted_at.map(|t| t.with_timezone(&Utc)),
            counted_by: model.counted_by,
            counting_date: model.counting_date,
            counting_time: model.counting_time,
            total: model.total,
            notes: model.notes,
        }
    }
}

/// GET /expense-funds - List expense records.
async fn list_expenses(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListExpensesQuery>,
) -> impl IntoResponse {
    let repo = ExpenseFundRepository::new((*state.db).clone());

    match repo.list(query.from, query.to).await {
        Ok(records) => {
            let records: Vec<ExpenseResponse> =
                records.into_iter().map(ExpenseResponse::from).collect();
            (StatusCode::OK, Json(records)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Database error listing expense funds");
            internal_error()
        }
    }
}

/// GET /expense-funds/{id} - Get an expense record.
async fn get_expense(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let repo = ExpenseFundRepository::new((*state.db).clone());

    match repo.find_by_id(id).await {
        Ok(Some(record)) => (StatusCode::OK, Json(ExpenseResponse::from(record))).into_response(),
        Ok(None) => not_found(),
        Err(e) => {
            error!(error = %e, "Database error loading expense fund");
            internal_error()
        }
    }
}

/// POST /expense-funds - Record an expense.
async fn create_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateExpenseRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_writer(&state, auth.user_id()).await {
        return response;
    }

    let repo = ExpenseFundRepository::new((*state.db).clone());
    let input = CreateExpenseFundInput {
        store_id: payload.store_id,
        expense_type: payload.expense_type,
        amount: payload.amount,
        coins: payload.coins,
        invoice_date: payload.invoice_date,
        invoice_number: payload.invoice_number,
        reason: payload.reason,
        supplier: payload.supplier,
        counted_at: payload.counted_at,
        counted_by: payload.counted_by,
        counting_date: payload.counting_date,
        counting_time: payload.counting_time,
        total: payload.total,
        notes: payload.notes,
    };

    match repo.create(input).await {
        Ok(record) => {
            info!(record_id = %record.id, user_id = %auth.user_id(), "Expense fund record created");
            (StatusCode::CREATED, Json(ExpenseResponse::from(record))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create expense fund record");
            internal_error()
        }
    }
}

/// PUT /expense-funds/{id} - Update an expense record.
async fn update_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateExpenseRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_writer(&state, auth.user_id()).await {
        return response;
    }

    let repo = ExpenseFundRepository::new((*state.db).clone());
    let input = UpdateExpenseFundInput {
        store_id: payload.store_id,
        expense_type: payload.expense_type,
        amount: payload.amount,
        coins: payload.coins,
        invoice_date: payload.invoice_date,
        invoice_number: payload.invoice_number,
        reason: payload.reason,
        supplier: payload.supplier,
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
            error!(error = %e, "Failed to update expense fund record");
            internal_error()
        }
    }
}

/// DELETE /expense-funds/{id} - Delete an expense record.
async fn delete_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    if let Err(response) = require_writer(&state, auth.user_id()).await {
        return response;
    }

    let repo = ExpenseFundRepository::new((*state.db).clone());
    match repo.delete(id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => not_found(),
        Err(e) => {
            error!(error = %e, "Failed to delete expense fund record");
            internal_error()
        }
    }
}

fn not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": "Expense fund record not found"
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
