//! `SeaORM` Entity for the envelopes table (sealed cash envelopes).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "envelopes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Business day the envelope accounts for.
    pub reference_date: Date,
    pub closed_at: Option<DateTimeWithTimeZone>,
    pub collected_at: Option<DateTimeWithTimeZone>,
    pub seal_code: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub total: Decimal,
    pub notes: Option<String>,
    pub closed_by: Option<String>,
    pub collected_by: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
    pub user_id: i32,
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
