//! Expense fund repository for database operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::expense_funds;

/// Input for creating an expense fund record.
#[derive(Debug, Clone)]
pub struct CreateExpenseFundInput {
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
    pub counted_at: Option<chrono::DateTime<chrono::Utc>>,
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

/// Input for updating an expense fund record. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateExpenseFundInput {
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
    pub counted_at: Option<chrono::DateTime<chrono::Utc>>,
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

/// Expense fund repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ExpenseFundRepository {
    db: DatabaseConnection,
}

impl ExpenseFundRepository {
    /// Creates a new expense fund repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists records, optionally restricted to a counting-date range, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<expense_funds::Model>, DbErr> {
        let mut query = expense_funds::Entity::find();

        if let Some(from) = from {
            query = query.filter(expense_funds::Column::CountingDate.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(expense_funds::Column::CountingDate.lte(to));
        }

        query
            .order_by_desc(expense_funds::Column::CountingDate)
            .all(&self.db)
            .await
    }

    /// Finds a record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<expense_funds::Model>, DbErr> {
        expense_funds::Entity::find_by_id(id).one(&self.db).await
    }

    /// Creates a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        input: CreateExpenseFundInput,
    ) -> Result<expense_funds::Model, DbErr> {
        let record = expense_funds::ActiveModel {
            store_id: Set(input.store_id),
            expense_type: Set(input.expense_type),
            amount: Set(input.amount),
            coins: Set(input.coins),
            invoice_date: Set(input.invoice_date),
            invoice_number: Set(input.invoice_number),
            reason: Set(input.reason),
            supplier: Set(input.supplier),
            counted_at: Set(input.counted_at.map(Into::into)),
            counted_by: Set(input.counted_by),
            counting_date: Set(input.counting_date),
            counting_time: Set(input.counting_time),
            total: Set(input.total),
            notes: Set(input.notes),
            ..Default::default()
        };

        record.insert(&self.db).await
    }

    /// Updates a record. Returns `None` if no row matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update(
        &self,
        id: i32,
        input: UpdateExpenseFundInput,
    ) -> Result<Option<expense_funds::Model>, DbErr> {
        let Some(record) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut model: expense_funds::ActiveModel = record.into();
        if let Some(store_id) = input.store_id {
            model.store_id = Set(store_id);
        }
        if let Some(expense_type) = input.expense_type {
            model.expense_type = Set(Some(expense_type));
        }
        if let Some(amount) = input.amount {
            model.amount = Set(Some(amount));
        }
        if let Some(coins) = input.coins {
            model.coins = Set(Some(coins));
        }
        if let Some(invoice_date) = input.invoice_date {
            model.invoice_date = Set(Some(invoice_date));
        }
        if let Some(invoice_number) = input.invoice_number {
            model.invoice_number = Set(Some(invoice_number));
        }
        if let Some(reason) = input.reason {
            model.reason = Set(Some(reason));
        }
        if let Some(supplier) = input.supplier {
            model.supplier = Set(Some(supplier));
        }
        if let Some(counted_at) = input.counted_at {
            model.counted_at = Set(Some(counted_at.into()));
        }
        if let Some(counted_by) = input.counted_by {
            model.counted_by = Set(Some(counted_by));
        }
        if let Some(counting_date) = input.counting_date {
            model.counting_date = Set(Some(counting_date));
        }
        if let Some(counting_time) = input.counting_time {
            model.counting_time = Set(Some(counting_time));
        }
        if let Some(total) = input.total {
            model.total = Set(Some(total));
        }
        if let Some(notes) = input.notes {
            model.notes = Set(Some(notes));
        }

        model.update(&self.db).await.map(Some)
    }

    /// Deletes a record. Returns `false` if no row matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = expense_funds::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
