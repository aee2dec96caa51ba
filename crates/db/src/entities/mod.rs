//! `SeaORM` entity definitions.

pub mod cash_floats;
pub mod envelopes;
pub mod expense_funds;
pub mod refresh_tokens;
pub mod reserve_counts;
pub mod safe_withdrawals;
pub mod sea_orm_active_enums;
pub mod users;
