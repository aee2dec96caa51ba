//! `SeaORM` Entity for the refresh_tokens table.
//!
//! Rows are never deleted on revocation; `revoked_at` flips once and the row
//! stays as an audit trail until the owning user is deleted (cascade).

use chrono::Utc;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "refresh_tokens")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    /// SHA-256 hex digest of the opaque token; the plaintext is never stored.
    #[sea_orm(unique)]
    pub token_hash: String,
    pub expires_at: DateTimeWithTimeZone,
    pub created_at: DateTimeWithTimeZone,
    pub revoked_at: Option<DateTimeWithTimeZone>,
}

impl Model {
    /// Whether the token's absolute expiry has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at.with_timezone(&Utc)
    }

    /// Whether the token has been explicitly revoked.
    #[must_use]
    pub const fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Whether the token can still be redeemed: not revoked and not expired.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.is_revoked() && !self.is_expired()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token(expires_in: Duration, revoked: bool) -> Model {
        let now = Utc::now();
        Model {
            id: 1,
            user_id: 1,
            token_hash: "abc".to_string(),
            expires_at: (now + expires_in).into(),
            created_at: now.into(),
            revoked_at: revoked.then(|| now.into()),
        }
    }

    #[test]
    fn fresh_token_is_active() {
        let t = token(Duration::days(7), false);
        assert!(t.is_active());
        assert!(!t.is_expired());
        assert!(!t.is_revoked());
    }

    #[test]
    fn revoked_token_is_terminal() {
        let t = token(Duration::days(7), true);
        assert!(t.is_revoked());
        assert!(!t.is_active());
    }

    #[test]
    fn expired_token_is_terminal() {
        let t = token(Duration::seconds(-1), false);
        assert!(t.is_expired());
        assert!(!t.is_active());
    }

    #[test]
    fn revoked_and_expired_is_still_inactive() {
        let t = token(Duration::seconds(-1), true);
        assert!(!t.is_active());
    }
}
