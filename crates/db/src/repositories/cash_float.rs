//! Cash-drawer float repository for database operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::cash_floats;

/// Input for creating a cash float record.
#[derive(Debug, Clone)]
pub struct CreateCashFloatInput {
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

/// Input for updating a cash float record. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateCashFloatInput {
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

/// Cash float repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CashFloatRepository {
    db: DatabaseConnection,
}

impl CashFloatRepository {
    /// Creates a new cash float repository.
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
    ) -> Result<Vec<cash_floats::Model>, DbErr> {
        let mut query = cash_floats::Entity::find();

        if let Some(from) = from {
            query = query.filter(cash_floats::Column::CountingDate.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(cash_floats::Column::CountingDate.lte(to));
        }

        query
            .order_by_desc(cash_floats::Column::CountingDate)
            .all(&self.db)
            .await
    }

    /// Finds a record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<cash_floats::Model>, DbErr> {
        cash_floats::Entity::find_by_id(id).one(&self.db).await
    }

    /// Creates a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateCashFloatInput) -> Result<cash_floats::Model, DbErr> {
        let record = cash_floats::ActiveModel {
            store_id: Set(input.store_id),
            drawer_code: Set(input.drawer_code),
            register: Set(input.register),
            amount: Set(input.amount),
            coins: Set(input.coins),
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
        input: UpdateCashFloatInput,
    ) -> Result<Option<cash_floats::Model>, DbErr> {
        let Some(record) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut model: cash_floats::ActiveModel = record.into();
        if let Some(store_id) = input.store_id {
            model.store_id = Set(store_id);
        }
        if let Some(drawer_code) = input.drawer_code {
            model.drawer_code = Set(Some(drawer_code));
        }
        if let Some(register) = input.register {
            model.register = Set(Some(register));
        }
        if let Some(amount) = input.amount {
            model.amount = Set(Some(amount));
        }
        if let Some(coins) = input.coins {
            model.coins = Set(Some(coins));
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
        let result = cash_floats::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
