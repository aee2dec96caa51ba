//! Request middleware and authorization helpers.

pub mod auth;
pub mod authz;

pub use auth::AuthUser;
