//! Shared types, errors, and configuration for CashUp.
//!
//! This crate provides common types used across all other crates:
//! - Auth request/response payloads and JWT claims
//! - JWT signing and validation
//! - Application-wide error types
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtError, JwtService};

#[cfg(test)]
mod auth_tests;
