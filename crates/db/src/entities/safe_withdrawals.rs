//! `SeaORM` Entity for the safe_withdrawals table (smart-safe banknote withdrawals).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "safe_withdrawals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub store_id: i32,
    pub store_alias: Option<String>,
    /// Security envelope code printed by the smart safe.
    pub envelope_code: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub amount: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub difference: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub coins: Option<Decimal>,
    pub withdrawal_at: Option<DateTimeWithTimeZone>,
    pub courier_date: Option<Date>,
    pub imported_at: Option<DateTimeWithTimeZone>,
    pub counted_at: Option<DateTimeWithTimeZone>,
    pub counted_by: Option<String>,
    pub counting_date: Option<Date>,
    pub counting_time: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub total: Option<Decimal>,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
