//! Initial database migration.
//!
//! Creates the role enum, the users and refresh_tokens tables, and the five
//! cash-count record tables with their indexes.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(REFRESH_TOKENS_SQL).await?;
        db.execute_unprepared(ENVELOPES_SQL).await?;
        db.execute_unprepared(SAFE_WITHDRAWALS_SQL).await?;
        db.execute_unprepared(EXPENSE_FUNDS_SQL).await?;
        db.execute_unprepared(CASH_FLOATS_SQL).await?;
        db.execute_unprepared(RESERVE_COUNTS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(
            "DROP TABLE IF EXISTS reserve_counts, cash_floats, expense_funds, \
             safe_withdrawals, envelopes, refresh_tokens, users CASCADE;",
        )
        .await?;
        db.execute_unprepared("DROP TYPE IF EXISTS user_role;").await?;

        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE user_role AS ENUM ('reader', 'writer', 'admin');
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id SERIAL PRIMARY KEY,
    username VARCHAR(50) NOT NULL UNIQUE,
    email VARCHAR(100) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    role user_role NOT NULL DEFAULT 'reader',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const REFRESH_TOKENS_SQL: &str = r"
-- Refresh tokens are stored as SHA-256 digests, never as plaintext
CREATE TABLE refresh_tokens (
    id SERIAL PRIMARY KEY,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    token_hash VARCHAR(64) NOT NULL UNIQUE,
    expires_at TIMESTAMPTZ NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    revoked_at TIMESTAMPTZ
);

-- Index for token lookup (most common operation)
CREATE INDEX idx_refresh_tokens_hash ON refresh_tokens(token_hash) WHERE revoked_at IS NULL;

-- Index for a user's tokens (cascade bookkeeping, admin views)
CREATE INDEX idx_refresh_tokens_user ON refresh_tokens(user_id, created_at DESC);
";

const ENVELOPES_SQL: &str = r"
CREATE TABLE envelopes (
    id SERIAL PRIMARY KEY,
    reference_date DATE NOT NULL,
    closed_at TIMESTAMPTZ,
    collected_at TIMESTAMPTZ,
    seal_code VARCHAR(100),
    total NUMERIC(18,2) NOT NULL DEFAULT 0,
    notes VARCHAR(500),
    closed_by VARCHAR(100),
    collected_by VARCHAR(100),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE
);

CREATE INDEX idx_envelopes_user_date ON envelopes(user_id, reference_date DESC);
";

const SAFE_WITHDRAWALS_SQL: &str = r"
CREATE TABLE safe_withdrawals (
    id SERIAL PRIMARY KEY,
    store_id INTEGER NOT NULL,
    store_alias VARCHAR(100),
    envelope_code VARCHAR(100),
    amount NUMERIC(10,2),
    difference NUMERIC(10,2),
    coins NUMERIC(10,2),
    withdrawal_at TIMESTAMPTZ,
    courier_date DATE,
    imported_at TIMESTAMPTZ,
    counted_at TIMESTAMPTZ,
    counted_by VARCHAR(100),
    counting_date DATE,
    counting_time VARCHAR(10),
    total NUMERIC(10,2),
    notes VARCHAR(500)
);

CREATE INDEX idx_safe_withdrawals_date ON safe_withdrawals(counting_date DESC);
";

const EXPENSE_FUNDS_SQL: &str = r"
CREATE TABLE expense_funds (
    id SERIAL PRIMARY KEY,
    store_id INTEGER NOT NULL,
    expense_type VARCHAR(100),
    amount NUMERIC(10,2),
    coins NUMERIC(10,2),
    invoice_date DATE,
    invoice_number VARCHAR(100),
    reason VARCHAR(500),
    supplier VARCHAR(255),
    counted_at TIMESTAMPTZ,
    counted_by VARCHAR(100),
    counting_date DATE,
    counting_time VARCHAR(10),
    total NUMERIC(10,2),
    notes VARCHAR(500)
);

CREATE INDEX idx_expense_funds_date ON expense_funds(counting_date DESC);
";

const CASH_FLOATS_SQL: &str = r"
CREATE TABLE cash_floats (
    id SERIAL PRIMARY KEY,
    store_id INTEGER NOT NULL,
    drawer_code VARCHAR(100),
    register VARCHAR(50),
    amount NUMERIC(10,2),
    coins NUMERIC(10,2),
    counted_at TIMESTAMPTZ,
    counted_by VARCHAR(100),
    counting_date DATE,
    counting_time VARCHAR(10),
    total NUMERIC(10,2),
    notes VARCHAR(500)
);

CREATE INDEX idx_cash_floats_date ON cash_floats(counting_date DESC);
";

const RESERVE_COUNTS_SQL: &str = r"
CREATE TABLE reserve_counts (
    id SERIAL PRIMARY KEY,
    store_id INTEGER NOT NULL,
    amount NUMERIC(10,2),
    coins NUMERIC(10,2),
    coins_total NUMERIC(10,2),
    banknotes_total NUMERIC(10,2),
    counted_at TIMESTAMPTZ,
    counted_by VARCHAR(100),
    counting_date DATE,
    counting_time VARCHAR(10),
    total NUMERIC(10,2),
    notes VARCHAR(500)
);

CREATE INDEX idx_reserve_counts_date ON reserve_counts(counting_date DESC);
";
