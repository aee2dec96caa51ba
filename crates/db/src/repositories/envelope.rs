//! Envelope repository for database operations.
//!
//! Envelopes are scoped to the user who recorded them; every query filters by
//! the owning user id.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::envelopes;

/// Input for creating an envelope.
#[derive(Debug, Clone)]
pub struct CreateEnvelopeInput {
    /// Business day the envelope accounts for.
    pub reference_date: NaiveDate,
    /// When the envelope was sealed.
    pub closed_at: Option<chrono::DateTime<chrono::Utc>>,
    /// When the envelope was collected.
    pub collected_at: Option<chrono::DateTime<chrono::Utc>>,
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

/// Input for updating an envelope. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateEnvelopeInput {
    /// New reference date.
    pub reference_date: Option<NaiveDate>,
    /// New closing instant.
    pub closed_at: Option<chrono::DateTime<chrono::Utc>>,
    /// New collection instant.
    pub collected_at: Option<chrono::DateTime<chrono::Utc>>,
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

/// Envelope repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct EnvelopeRepository {
    db: DatabaseConnection,
}

impl EnvelopeRepository {
    /// Creates a new envelope repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists a user's envelopes, optionally restricted to a date range,
    /// newest reference date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        user_id: i32,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<envelopes::Model>, DbErr> {
        let mut query =
            envelopes::Entity::find().filter(envelopes::Column::UserId.eq(user_id));

        if let Some(from) = from {
            query = query.filter(envelopes::Column::ReferenceDate.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(envelopes::Column::ReferenceDate.lte(to));
        }

        query
            .order_by_desc(envelopes::Column::ReferenceDate)
            .all(&self.db)
            .await
    }

    /// Finds one of a user's envelopes by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        id: i32,
        user_id: i32,
    ) -> Result<Option<envelopes::Model>, DbErr> {
        envelopes::Entity::find_by_id(id)
            .filter(envelopes::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    /// Creates an envelope owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        user_id: i32,
        input: CreateEnvelopeInput,
    ) -> Result<envelopes::Model, DbErr> {
        let record = envelopes::ActiveModel {
            reference_date: Set(input.reference_date),
            closed_at: Set(input.closed_at.map(Into::into)),
            collected_at: Set(input.collected_at.map(Into::into)),
            seal_code: Set(input.seal_code),
            total: Set(input.total),
            notes: Set(input.notes),
            closed_by: Set(input.closed_by),
            collected_by: Set(input.collected_by),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
            user_id: Set(user_id),
            ..Default::default()
        };

        record.insert(&self.db).await
    }

    /// Updates one of a user's envelopes. Returns `None` if no row matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update(
        &self,
        id: i32,
        user_id: i32,
        input: UpdateEnvelopeInput,
    ) -> Result<Option<envelopes::Model>, DbErr> {
        let Some(record) = self.find_by_id(id, user_id).await? else {
            return Ok(None);
        };

        let mut model: envelopes::ActiveModel = record.into();
        if let Some(reference_date) = input.reference_date {
            model.reference_date = Set(reference_date);
        }
        if let Some(closed_at) = input.closed_at {
            model.closed_at = Set(Some(closed_at.into()));
        }
        if let Some(collected_at) = input.collected_at {
            model.collected_at = Set(Some(collected_at.into()));
        }
        if let Some(seal_code) = input.seal_code {
            model.seal_code = Set(Some(seal_code));
        }
        if let Some(total) = input.total {
            model.total = Set(total);
        }
        if let Some(notes) = input.notes {
            model.notes = Set(Some(notes));
        }
        if let Some(closed_by) = input.closed_by {
            model.closed_by = Set(Some(closed_by));
        }
        if let Some(collected_by) = input.collected_by {
            model.collected_by = Set(Some(collected_by));
        }
        model.updated_at = Set(Some(chrono::Utc::now().into()));

        model.update(&self.db).await.map(Some)
    }

    /// Deletes one of a user's envelopes. Returns `false` if no row matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: i32, user_id: i32) -> Result<bool, DbErr> {
        let result = envelopes::Entity::delete_many()
            .filter(envelopes::Column::Id.eq(id))
            .filter(envelopes::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Duplicates an envelope into a fresh open one dated today: seal code,
    /// total, and notes carry over; closing and collection state do not.
    /// Returns `None` if the source row does not exist for this user.
    ///
    /// # Errors
    ///
    /// Returns an error if a database statement fails.
    pub async fn duplicate(
        &self,
        id: i32,
        user_id: i32,
    ) -> Result<Option<envelopes::Model>, DbErr> {
        let Some(original) = self.find_by_id(id, user_id).await? else {
            return Ok(None);
        };

        let copy = CreateEnvelopeInput {
            reference_date: chrono::Utc::now().date_naive(),
            closed_at: None,
            collected_at: None,
            seal_code: original.seal_code,
            total: original.total,
            notes: original.notes,
            closed_by: None,
            collected_by: None,
        };

        self.create(user_id, copy).await.map(Some)
    }
}
