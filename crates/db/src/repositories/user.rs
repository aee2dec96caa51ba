//! User repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::{sea_orm_active_enums::UserRole, users};

/// Fields an admin may change on a user. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserInput {
    /// New username.
    pub username: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New password hash (already hashed by the caller).
    pub password_hash: Option<String>,
    /// New role.
    pub role: Option<UserRole>,
}

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// Checks if an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Checks if a username is already taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn username_exists(&self, username: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Checks if an email belongs to a user other than `exclude_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_taken_by_other(&self, email: &str, exclude_id: i32) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .filter(users::Column::Id.ne(exclude_id))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Checks if a username belongs to a user other than `exclude_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn username_taken_by_other(
        &self,
        username: &str,
        exclude_id: i32,
    ) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .filter(users::Column::Id.ne(exclude_id))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<users::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let user = users::ActiveModel {
            username: Set(username.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            role: Set(role),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        user.insert(&self.db).await
    }

    /// Lists all users, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(&self) -> Result<Vec<users::Model>, DbErr> {
        users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Updates a user. Returns `None` if the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update(
        &self,
        id: i32,
        input: UpdateUserInput,
    ) -> Result<Option<users::Model>, DbErr> {
        let Some(user) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut model: users::ActiveModel = user.into();
        if let Some(username) = input.username {
            model.username = Set(username);
        }
        if let Some(email) = input.email {
            model.email = Set(email);
        }
        if let Some(password_hash) = input.password_hash {
            model.password_hash = Set(password_hash);
        }
        if let Some(role) = input.role {
            model.role = Set(role);
        }
        model.updated_at = Set(chrono::Utc::now().into());

        model.update(&self.db).await.map(Some)
    }

    /// Deletes a user. Returns `false` if no row matched.
    ///
    /// Refresh tokens and envelopes cascade with the row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = users::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    /// Reads the current role of a user.
    ///
    /// Authorization calls this on every protected write so that role changes
    /// take effect on the next request, without waiting for token expiry.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn role_of(&self, id: i32) -> Result<Option<UserRole>, DbErr> {
        let user = self.find_by_id(id).await?;
        Ok(user.map(|u| u.role))
    }

    /// Checks whether any admin user exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn admin_exists(&self) -> Result<bool, DbErr> {
        let admin = users::Entity::find()
            .filter(users::Column::Role.eq(UserRole::Admin))
            .one(&self.db)
            .await?;

        Ok(admin.is_some())
    }

    /// Promotes the earliest-created user to admin if no admin exists yet.
    ///
    /// Run once at process start. Idempotent: a no-op when an admin already
    /// exists or when the store is empty. Returns the promoted user, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query or update fails.
    pub async fn ensure_bootstrap_admin(&self) -> Result<Option<users::Model>, DbErr> {
        if self.admin_exists().await? {
            return Ok(None);
        }

        let Some(first) = users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut model: users::ActiveModel = first.into();
        model.role = Set(UserRole::Admin);
        model.updated_at = Set(chrono::Utc::now().into());

        model.update(&self.db).await.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn user(id: i32, role: UserRole) -> users::Model {
        let now = chrono::Utc::now().into();
        users::Model {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            password_hash: "$argon2id$test".to_string(),
            role,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn bootstrap_promotes_first_user_when_no_admin() {
        let promoted = users::Model {
            role: UserRole::Admin,
            ..user(1, UserRole::Reader)
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<users::Model>::new()]) // admin lookup
            .append_query_results([vec![user(1, UserRole::Reader)]]) // earliest user
            .append_query_results([vec![promoted.clone()]]) // update returning
            .into_connection();

        let repo = UserRepository::new(db);
        let result = repo.ensure_bootstrap_admin().await.unwrap();

        assert_eq!(result.map(|u| u.role), Some(UserRole::Admin));
    }

    #[tokio::test]
    async fn bootstrap_is_noop_when_admin_exists() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user(3, UserRole::Admin)]])
            .into_connection();

        let repo = UserRepository::new(db);
        let result = repo.ensure_bootstrap_admin().await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn bootstrap_is_noop_on_empty_store() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<users::Model>::new()]) // admin lookup
            .append_query_results([Vec::<users::Model>::new()]) // earliest user
            .into_connection();

        let repo = UserRepository::new(db);
        let result = repo.ensure_bootstrap_admin().await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn role_of_reads_current_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user(5, UserRole::Writer)]])
            .into_connection();

        let repo = UserRepository::new(db);
        let role = repo.role_of(5).await.unwrap();

        assert_eq!(role, Some(UserRole::Writer));
    }

    #[tokio::test]
    async fn role_of_missing_user_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<users::Model>::new()])
            .into_connection();

        let repo = UserRepository::new(db);
        let role = repo.role_of(99).await.unwrap();

        assert_eq!(role, None);
    }
}
