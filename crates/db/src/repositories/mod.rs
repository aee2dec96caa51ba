//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod cash_float;
pub mod envelope;
pub mod expense_fund;
pub mod refresh_token;
pub mod reserve_count;
pub mod safe_withdrawal;
pub mod user;

pub use cash_float::{CashFloatRepository, CreateCashFloatInput, UpdateCashFloatInput};
pub use envelope::{CreateEnvelopeInput, EnvelopeRepository, UpdateEnvelopeInput};
pub use expense_fund::{CreateExpenseFundInput, ExpenseFundRepository, UpdateExpenseFundInput};
pub use refresh_token::RefreshTokenRepository;
pub use reserve_count::{CreateReserveCountInput, ReserveCountRepository, UpdateReserveCountInput};
pub use safe_withdrawal::{
    CreateSafeWithdrawalInput, SafeWithdrawalRepository, UpdateSafeWithdrawalInput,
};
pub use user::{UpdateUserInput, UserRepository};
