//! Refresh token repository for database operations.
//!
//! Tokens are opaque random strings handed to the client once; only their
//! SHA-256 digest is persisted, so lookups hash the presented token first.

use rand::RngCore;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use sha2::{Digest, Sha256};

use crate::entities::refresh_tokens;

/// Refresh token repository.
#[derive(Debug, Clone)]
pub struct RefreshTokenRepository {
    db: DatabaseConnection,
}

impl RefreshTokenRepository {
    /// Creates a new refresh token repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Generates a fresh opaque token: 32 bytes from a CSPRNG, base64url-encoded.
    #[must_use]
    pub fn new_token() -> String {
        let mut bytes = [0u8; 32];
        rand::rng().fill_bytes(&mut bytes);
        base64_url::encode(&bytes)
    }

    /// Hashes a token for storage and lookup.
    #[must_use]
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Persists a freshly issued token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        user_id: i32,
        token: &str,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<refresh_tokens::Model, DbErr> {
        let record = refresh_tokens::ActiveModel {
            user_id: Set(user_id),
            token_hash: Set(Self::hash_token(token)),
            expires_at: Set(expires_at.into()),
            created_at: Set(chrono::Utc::now().into()),
            revoked_at: Set(None),
            ..Default::default()
        };

        record.insert(&self.db).await
    }

    /// Finds a non-revoked token row by its plaintext token.
    ///
    /// Revoked rows are filtered out at the query; callers still check
    /// `is_active()` to cover expiry.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<refresh_tokens::Model>, DbErr> {
        let token_hash = Self::hash_token(token);

        refresh_tokens::Entity::find()
            .filter(refresh_tokens::Column::TokenHash.eq(token_hash))
            .filter(refresh_tokens::Column::RevokedAt.is_null())
            .one(&self.db)
            .await
    }

    /// Revokes a token by ID. Returns `false` if the row was already revoked
    /// or does not exist.
    ///
    /// The `revoked_at IS NULL` guard makes the flip a single atomic
    /// statement: of two concurrent revocations of one token, exactly one
    /// observes the row as still active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn revoke(&self, id: i32) -> Result<bool, DbErr> {
        let now = chrono::Utc::now();

        let result = refresh_tokens::Entity::update_many()
            .col_expr(
                refresh_tokens::Column::RevokedAt,
                sea_orm::sea_query::Expr::value(now),
            )
            .filter(refresh_tokens::Column::Id.eq(id))
            .filter(refresh_tokens::Column::RevokedAt.is_null())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Revokes a token by its plaintext token. Returns `false` if no active
    /// row matched; callers treat that as success (idempotent logout).
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn revoke_by_token(&self, token: &str) -> Result<bool, DbErr> {
        let record = self.find_by_token(token).await?;

        if let Some(r) = record {
            self.revoke(r.id).await
        } else {
            Ok(false)
        }
    }

    /// Rotates a consumed token: revokes the old row, then issues and persists
    /// a replacement for the same user. Returns the new row and the plaintext
    /// token to hand to the client, or `None` if a concurrent refresh already
    /// consumed the old token.
    ///
    /// The two statements are deliberately sequential, not transactional: a
    /// failure after the revoke leaves the user unable to refresh until they
    /// log in again, which the caller surfaces as a fatal error.
    ///
    /// # Errors
    ///
    /// Returns an error if either statement fails.
    pub async fn rotate(
        &self,
        old_id: i32,
        user_id: i32,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<Option<(refresh_tokens::Model, String)>, DbErr> {
        if !self.revoke(old_id).await? {
            return Ok(None);
        }

        let token = Self::new_token();
        let record = self.create(user_id, &token, expires_at).await?;
        Ok(Some((record, token)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::collections::HashSet;

    #[test]
    fn new_token_is_32_random_bytes() {
        let token = RefreshTokenRepository::new_token();
        let bytes = base64_url::decode(&token).expect("base64url");
        assert_eq!(bytes.len(), 32);
    }

    #[test]
    fn new_tokens_do_not_repeat() {
        let tokens: HashSet<String> = (0..64)
            .map(|_| RefreshTokenRepository::new_token())
            .collect();
        assert_eq!(tokens.len(), 64);
    }

    #[test]
    fn hash_token_is_deterministic_hex_digest() {
        let a = RefreshTokenRepository::hash_token("some-token");
        let b = RefreshTokenRepository::hash_token("some-token");
        let c = RefreshTokenRepository::hash_token("other-token");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|ch| ch.is_ascii_hexdigit()));
    }

    fn row(id: i32, revoked: bool) -> refresh_tokens::Model {
        let now = Utc::now();
        refresh_tokens::Model {
            id,
            user_id: 1,
            token_hash: RefreshTokenRepository::hash_token("tok"),
            expires_at: (now + Duration::days(7)).into(),
            created_at: now.into(),
            revoked_at: revoked.then(|| now.into()),
        }
    }

    #[tokio::test]
    async fn find_by_token_returns_matching_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(1, false)]])
            .into_connection();

        let repo = RefreshTokenRepository::new(db);
        let found = repo.find_by_token("tok").await.unwrap();

        assert_eq!(found.map(|r| r.id), Some(1));
    }

    #[tokio::test]
    async fn revoke_by_unknown_token_reports_no_match() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<refresh_tokens::Model>::new()])
            .into_connection();

        let repo = RefreshTokenRepository::new(db);
        let revoked = repo.revoke_by_token("gone").await.unwrap();

        assert!(!revoked);
    }

    #[tokio::test]
    async fn rotate_loses_race_when_token_already_revoked() {
        // The guarded UPDATE matches no row, so no replacement is issued
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = RefreshTokenRepository::new(db);
        let rotated = repo
            .rotate(1, 1, Utc::now() + Duration::days(7))
            .await
            .unwrap();

        assert!(rotated.is_none());
    }
}
