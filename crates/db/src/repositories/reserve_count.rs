//! Monetary reserve count repository for database operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::reserve_counts;

/// Input for creating a reserve count record.
#[derive(Debug, Clone)]
pub struct CreateReserveCountInput {
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

/// Input for updating a reserve count record. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateReserveCountInput {
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

/// Reserve count repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ReserveCountRepository {
    db: DatabaseConnection,
}

impl ReserveCountRepository {
    /// Creates a new reserve count repository.
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
    ) -> Result<Vec<reserve_counts::Model>, DbErr> {
        let mut query = reserve_counts::Entity::find();

        if let Some(from) = from {
            query = query.filter(reserve_counts::Column::CountingDate.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(reserve_counts::Column::CountingDate.lte(to));
        }

        query
            .order_by_desc(reserve_counts::Column::CountingDate)
            .all(&self.db)
            .await
    }

    /// Finds a record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<reserve_counts::Model>, DbErr> {
        reserve_counts::Entity::find_by_id(id).one(&self.db).await
    }

    /// Creates a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        input: CreateReserveCountInput,
    ) -> Result<reserve_counts::Model, DbErr> {
        let record = reserve_counts::ActiveModel {
            store_id: Set(input.store_id),
            amount: Set(input.amount),
            coins: Set(input.coins),
            coins_total: Set(input.coins_total),
            banknotes_total: Set(input.banknotes_total),
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
        input: UpdateReserveCountInput,
    ) -> Result<Option<reserve_counts::Model>, DbErr> {
        let Some(record) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut model: reserve_counts::ActiveModel = record.into();
        if let Some(store_id) = input.store_id {
            model.store_id = Set(store_id);
        }
        if let Some(amount) = input.amount {
            model.amount = Set(Some(amount));
        }
        if let Some(coins) = input.coins {
            model.coins = Set(Some(coins));
        }
        if let Some(coins_total) = input.coins_total {
            model.coins_total = Set(Some(coins_total));
        }
        if let Some(banknotes_total) = input.banknotes_total {
            model.banknotes_total = Set(Some(banknotes_total));
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
        let result = reserve_counts::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
