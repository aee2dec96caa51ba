//! Smart-safe withdrawal repository for database operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::safe_withdrawals;

/// Input for creating a safe withdrawal record.
#[derive(Debug, Clone)]
pub struct CreateSafeWithdrawalInput {
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
    pub withdrawal_at: Option<chrono::DateTime<chrono::Utc>>,
    /// Courier pickup date.
    pub courier_date: Option<NaiveDate>,
    /// Import instant for machine-fed rows.
    pub imported_at: Option<chrono::DateTime<chrono::Utc>>,
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

/// Input for updating a safe withdrawal record. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateSafeWithdrawalInput {
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
    pub withdrawal_at: Option<chrono::DateTime<chrono::Utc>>,
    /// New courier date.
    pub courier_date: Option<NaiveDate>,
    /// New import instant.
    pub imported_at: Option<chrono::DateTime<chrono::Utc>>,
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

/// Safe withdrawal repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct SafeWithdrawalRepository {
    db: DatabaseConnection,
}

impl SafeWithdrawalRepository {
    /// Creates a new safe withdrawal repository.
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
    ) -> Result<Vec<safe_withdrawals::Model>, DbErr> {
        let mut query = safe_withdrawals::Entity::find();

        if let Some(from) = from {
            query = query.filter(safe_withdrawals::Column::CountingDate.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(safe_withdrawals::Column::CountingDate.lte(to));
        }

        query
            .order_by_desc(safe_withdrawals::Column::CountingDate)
            .all(&self.db)
            .await
    }

    /// Finds a record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<safe_withdrawals::Model>, DbErr> {
        safe_withdrawals::Entity::find_by_id(id).one(&self.db).await
    }

    /// Creates a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        input: CreateSafeWithdrawalInput,
    ) -> Result<safe_withdrawals::Model, DbErr> {
        let record = safe_withdrawals::ActiveModel {
            store_id: Set(input.store_id),
            store_alias: Set(input.store_alias),
            envelope_code: Set(input.envelope_code),
            amount: Set(input.amount),
            difference: Set(input.difference),
            coins: Set(input.coins),
            withdrawal_at: Set(input.withdrawal_at.map(Into::into)),
            courier_date: Set(input.courier_date),
            imported_at: Set(input.imported_at.map(Into::into)),
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
        input: UpdateSafeWithdrawalInput,
    ) -> Result<Option<safe_withdrawals::Model>, DbErr> {
        let Some(record) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut model: safe_withdrawals::ActiveModel = record.into();
        if let Some(store_id) = input.store_id {
            model.store_id = Set(store_id);
        }
        if let Some(store_alias) = input.store_alias {
            model.store_alias = Set(Some(store_alias));
        }
        if let Some(envelope_code) = input.envelope_code {
            model.envelope_code = Set(Some(envelope_code));
        }
        if let Some(amount) = input.amount {
            model.amount = Set(Some(amount));
        }
        if let Some(difference) = input.difference {
            model.difference = Set(Some(difference));
        }
        if let Some(coins) = input.coins {
            model.coins = Set(Some(coins));
        }
        if let Some(withdrawal_at) = input.withdrawal_at {
            model.withdrawal_at = Set(Some(withdrawal_at.into()));
        }
        if let Some(courier_date) = input.courier_date {
            model.courier_date = Set(Some(courier_date));
        }
        if let Some(imported_at) = input.imported_at {
            model.imported_at = Set(Some(imported_at.into()));
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
        let result = safe_withdrawals::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
