//! `SeaORM` Entity for the expense_funds table (petty-expense fund movements).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "expense_funds")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub store_id: i32,
    pub expense_type: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub amount: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub coins: Option<Decimal>,
    pub invoice_date: Option<Date>,
    pub invoice_number: Option<String>,
    pub reason: Option<String>,
    pub supplier: Option<String>,
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
