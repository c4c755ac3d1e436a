//! Initial database migration.
//!
//! Creates all tables, indexes, and seed voucher configurations for the
//! posting engine.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: MASTERS
        // ============================================================
        db.execute_unprepared(PARTIES_SQL).await?;
        db.execute_unprepared(PARTY_CASH_BALANCES_SQL).await?;
        db.execute_unprepared(CASH_ACCOUNTS_SQL).await?;
        db.execute_unprepared(METAL_STOCKS_SQL).await?;
        db.execute_unprepared(VOUCHER_MASTERS_SQL).await?;

        // ============================================================
        // PART 2: BUSINESS DOCUMENTS
        // ============================================================
        db.execute_unprepared(METAL_TRANSACTIONS_SQL).await?;
        db.execute_unprepared(ENTRIES_SQL).await?;
        db.execute_unprepared(TRANSACTION_FIXINGS_SQL).await?;
        db.execute_unprepared(FUND_TRANSFERS_SQL).await?;
        db.execute_unprepared(DRAFTINGS_SQL).await?;

        // ============================================================
        // PART 3: LEDGER & COLLATERAL
        // ============================================================
        db.execute_unprepared(REGISTRY_ROWS_SQL).await?;
        db.execute_unprepared(FIXING_PRICES_SQL).await?;
        db.execute_unprepared(ACCOUNT_LOGS_SQL).await?;

        // ============================================================
        // PART 4: SEED DATA
        // ============================================================
        db.execute_unprepared(SEED_VOUCHER_MASTERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const PARTIES_SQL: &str = r"
CREATE TABLE parties (
    id UUID PRIMARY KEY,
    account_code VARCHAR(50) NOT NULL UNIQUE,
    account_type VARCHAR(30) NOT NULL,
    gold_grams NUMERIC(20, 6) NOT NULL DEFAULT 0,
    gold_value NUMERIC(20, 6) NOT NULL DEFAULT 0,
    last_balance_update TIMESTAMPTZ NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const PARTY_CASH_BALANCES_SQL: &str = r"
CREATE TABLE party_cash_balances (
    id UUID PRIMARY KEY,
    party_id UUID NOT NULL REFERENCES parties(id) ON DELETE CASCADE,
    currency VARCHAR(10) NOT NULL,
    amount NUMERIC(20, 6) NOT NULL DEFAULT 0,
    is_default BOOLEAN NOT NULL DEFAULT FALSE,
    last_updated TIMESTAMPTZ NOT NULL,
    CONSTRAINT uq_party_currency UNIQUE (party_id, currency)
);
";

const CASH_ACCOUNTS_SQL: &str = r"
CREATE TABLE cash_accounts (
    id UUID PRIMARY KEY,
    account_code VARCHAR(50) NOT NULL UNIQUE,
    name VARCHAR(120) NOT NULL,
    currency VARCHAR(10) NOT NULL,
    balance NUMERIC(20, 6) NOT NULL DEFAULT 0,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const METAL_STOCKS_SQL: &str = r"
CREATE TABLE metal_stocks (
    id UUID PRIMARY KEY,
    stock_code VARCHAR(50) NOT NULL UNIQUE,
    description TEXT,
    reference_type VARCHAR(40) NOT NULL,
    voucher_number VARCHAR(30),
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_metal_stocks_reference_type ON metal_stocks(reference_type);
";

const VOUCHER_MASTERS_SQL: &str = r"
CREATE TABLE voucher_masters (
    id UUID PRIMARY KEY,
    module VARCHAR(40) NOT NULL,
    voucher_type VARCHAR(80) NOT NULL,
    prefix VARCHAR(5) NOT NULL,
    number_length INTEGER NOT NULL DEFAULT 4,
    date_format VARCHAR(16) NOT NULL DEFAULT 'YYYY-MM-DD',
    is_auto_increment BOOLEAN NOT NULL DEFAULT FALSE,
    sequence BIGINT NOT NULL DEFAULT 0,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    status VARCHAR(20) NOT NULL DEFAULT 'active',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

-- At most one active configuration per module.
CREATE UNIQUE INDEX uq_voucher_masters_active_module
    ON voucher_masters(module) WHERE is_active;
";

const METAL_TRANSACTIONS_SQL: &str = r"
CREATE TABLE metal_transactions (
    id UUID PRIMARY KEY,
    voucher_number VARCHAR(30) NOT NULL UNIQUE,
    transaction_type VARCHAR(30) NOT NULL,
    party_id UUID NOT NULL REFERENCES parties(id),
    voucher_date DATE NOT NULL,
    settlement_currency VARCHAR(10) NOT NULL,
    total_amount NUMERIC(20, 6) NOT NULL,
    payload JSONB NOT NULL,
    status VARCHAR(20) NOT NULL,
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_metal_transactions_type_party_date
    ON metal_transactions(transaction_type, party_id, voucher_date DESC);
";

const ENTRIES_SQL: &str = r"
CREATE TABLE entries (
    id UUID PRIMARY KEY,
    voucher_number VARCHAR(30) NOT NULL UNIQUE,
    entry_type VARCHAR(30) NOT NULL,
    party_id UUID NOT NULL REFERENCES parties(id),
    entry_date DATE NOT NULL,
    payload JSONB NOT NULL,
    status VARCHAR(20) NOT NULL,
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_entries_type_party_date
    ON entries(entry_type, party_id, entry_date DESC);
";

const TRANSACTION_FIXINGS_SQL: &str = r"
CREATE TABLE transaction_fixings (
    id UUID PRIMARY KEY,
    transaction_code VARCHAR(20) NOT NULL UNIQUE,
    voucher_number VARCHAR(30) NOT NULL UNIQUE,
    fixing_type VARCHAR(20) NOT NULL,
    party_id UUID NOT NULL REFERENCES parties(id),
    fixing_date DATE NOT NULL,
    payload JSONB NOT NULL,
    status VARCHAR(20) NOT NULL,
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_transaction_fixings_type_party_date
    ON transaction_fixings(fixing_type, party_id, fixing_date DESC);
";

const FUND_TRANSFERS_SQL: &str = r"
CREATE TABLE fund_transfers (
    id UUID PRIMARY KEY,
    transaction_code VARCHAR(20) NOT NULL UNIQUE,
    voucher_number VARCHAR(30) NOT NULL UNIQUE,
    transfer_type VARCHAR(30) NOT NULL,
    asset_type VARCHAR(10) NOT NULL,
    sending_party UUID NOT NULL REFERENCES parties(id),
    receiving_party UUID NOT NULL REFERENCES parties(id),
    value NUMERIC(20, 6) NOT NULL,
    currency VARCHAR(10),
    cost_center VARCHAR(50),
    running_balance NUMERIC(20, 6),
    transfer_date DATE NOT NULL,
    payload JSONB NOT NULL,
    status VARCHAR(20) NOT NULL,
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_fund_transfers_type_date
    ON fund_transfers(transfer_type, transfer_date DESC);
";

const DRAFTINGS_SQL: &str = r"
CREATE TABLE draftings (
    id UUID PRIMARY KEY,
    voucher_code VARCHAR(30) NOT NULL UNIQUE,
    party_id UUID REFERENCES parties(id),
    payload JSONB NOT NULL,
    status VARCHAR(20) NOT NULL,
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const REGISTRY_ROWS_SQL: &str = r"
CREATE TABLE registry_rows (
    id UUID PRIMARY KEY,
    row_code VARCHAR(30) NOT NULL UNIQUE,
    ledger_type VARCHAR(40) NOT NULL,
    party_id UUID REFERENCES parties(id),
    metal_transaction_id UUID REFERENCES metal_transactions(id) ON DELETE CASCADE,
    fixing_transaction_id UUID REFERENCES transaction_fixings(id) ON DELETE CASCADE,
    entry_transaction_id UUID REFERENCES entries(id) ON DELETE CASCADE,
    fund_transfer_id UUID REFERENCES fund_transfers(id) ON DELETE CASCADE,
    description TEXT NOT NULL,
    value NUMERIC(20, 6) NOT NULL DEFAULT 0,
    gold_debit NUMERIC(20, 6) NOT NULL DEFAULT 0,
    gold_credit NUMERIC(20, 6) NOT NULL DEFAULT 0,
    cash_debit NUMERIC(20, 6) NOT NULL DEFAULT 0,
    cash_credit NUMERIC(20, 6) NOT NULL DEFAULT 0,
    debit NUMERIC(20, 6) NOT NULL DEFAULT 0,
    credit NUMERIC(20, 6) NOT NULL DEFAULT 0,
    gold_bid_value NUMERIC(20, 6),
    gross_weight NUMERIC(20, 6),
    asset_type VARCHAR(10),
    currency VARCHAR(10),
    currency_rate NUMERIC(20, 8),
    reference VARCHAR(30) NOT NULL,
    cost_center VARCHAR(50),
    transaction_date DATE NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_registry_rows_party_date
    ON registry_rows(party_id, transaction_date DESC);
CREATE INDEX idx_registry_rows_metal_transaction
    ON registry_rows(metal_transaction_id) WHERE metal_transaction_id IS NOT NULL;
CREATE INDEX idx_registry_rows_fixing
    ON registry_rows(fixing_transaction_id) WHERE fixing_transaction_id IS NOT NULL;
CREATE INDEX idx_registry_rows_entry
    ON registry_rows(entry_transaction_id) WHERE entry_transaction_id IS NOT NULL;
CREATE INDEX idx_registry_rows_fund_transfer
    ON registry_rows(fund_transfer_id) WHERE fund_transfer_id IS NOT NULL;
-- Prefix scans (reference LIKE 'OSB%') back the registry-counted vouchers.
CREATE INDEX idx_registry_rows_reference
    ON registry_rows(reference varchar_pattern_ops);
";

const FIXING_PRICES_SQL: &str = r"
CREATE TABLE fixing_prices (
    id UUID PRIMARY KEY,
    fixing_transaction_id UUID NOT NULL REFERENCES transaction_fixings(id) ON DELETE CASCADE,
    metal_rate_id UUID,
    bid_value NUMERIC(20, 6) NOT NULL,
    one_gram_rate NUMERIC(20, 6) NOT NULL,
    pure_weight NUMERIC(20, 6) NOT NULL,
    currency VARCHAR(10) NOT NULL,
    currency_rate NUMERIC(20, 8) NOT NULL,
    price NUMERIC(20, 6) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_fixing_prices_fixing ON fixing_prices(fixing_transaction_id);
";

const ACCOUNT_LOGS_SQL: &str = r"
CREATE TABLE account_logs (
    id UUID PRIMARY KEY,
    account_id UUID NOT NULL REFERENCES cash_accounts(id) ON DELETE CASCADE,
    action VARCHAR(10) NOT NULL,
    transaction_type VARCHAR(12) NOT NULL,
    amount NUMERIC(20, 6) NOT NULL,
    balance_after NUMERIC(20, 6) NOT NULL,
    note TEXT,
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_account_logs_account ON account_logs(account_id, created_at DESC);
";

const SEED_VOUCHER_MASTERS_SQL: &str = r"
INSERT INTO voucher_masters
    (id, module, voucher_type, prefix, number_length, date_format,
     is_auto_increment, sequence, is_active, status)
VALUES
    (gen_random_uuid(), 'metal-payment', 'Metal Payment', 'MP', 4, 'YYYY-MM-DD', true, 0, true, 'active'),
    (gen_random_uuid(), 'metal-receipt', 'Metal Receipt', 'MR', 4, 'YYYY-MM-DD', true, 0, true, 'active'),
    (gen_random_uuid(), 'currency-payment', 'Currency Payment', 'CP', 4, 'YYYY-MM-DD', true, 0, true, 'active'),
    (gen_random_uuid(), 'currency-receipt', 'Currency Receipt', 'CR', 4, 'YYYY-MM-DD', true, 0, true, 'active'),
    (gen_random_uuid(), 'entry', 'Entry', 'ENT', 4, 'YYYY-MM-DD', true, 0, true, 'active'),
    (gen_random_uuid(), 'metal-purchase', 'Metal Purchase', 'PUR', 4, 'YYYY-MM-DD', true, 0, true, 'active'),
    (gen_random_uuid(), 'metal-sale', 'Metal Sale', 'SAL', 4, 'YYYY-MM-DD', true, 0, true, 'active'),
    (gen_random_uuid(), 'purchase-return', 'Purchase Return', 'PRT', 4, 'YYYY-MM-DD', true, 0, true, 'active'),
    (gen_random_uuid(), 'sales-return', 'Sales Return', 'SRT', 4, 'YYYY-MM-DD', true, 0, true, 'active'),
    (gen_random_uuid(), 'sales-fixing', 'Sales Fixing', 'SF', 4, 'YYYY-MM-DD', true, 0, true, 'active'),
    (gen_random_uuid(), 'purchase-fixing', 'Purchase Fixing', 'PF', 4, 'YYYY-MM-DD', true, 0, true, 'active'),
    (gen_random_uuid(), 'transfer', 'Fund Transfer', 'TRF', 4, 'YYYY-MM-DD', true, 0, true, 'active'),
    (gen_random_uuid(), 'opening-balance', 'Opening Balance', 'OB', 4, 'YYYY-MM-DD', true, 0, true, 'active'),
    (gen_random_uuid(), 'metal-stock', 'Metal Stock', 'MS', 4, 'YYYY-MM-DD', true, 0, true, 'active'),
    (gen_random_uuid(), 'opening-stock-balance', 'Opening Stock Balance', 'OSB', 4, 'YYYY-MM-DD', true, 0, true, 'active'),
    (gen_random_uuid(), 'draft-metal', 'Draft Metal', 'DRF', 4, 'YYYY-MM-DD', false, 0, true, 'active');
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS account_logs CASCADE;
DROP TABLE IF EXISTS fixing_prices CASCADE;
DROP TABLE IF EXISTS registry_rows CASCADE;
DROP TABLE IF EXISTS draftings CASCADE;
DROP TABLE IF EXISTS fund_transfers CASCADE;
DROP TABLE IF EXISTS transaction_fixings CASCADE;
DROP TABLE IF EXISTS entries CASCADE;
DROP TABLE IF EXISTS metal_transactions CASCADE;
DROP TABLE IF EXISTS voucher_masters CASCADE;
DROP TABLE IF EXISTS metal_stocks CASCADE;
DROP TABLE IF EXISTS cash_accounts CASCADE;
DROP TABLE IF EXISTS party_cash_balances CASCADE;
DROP TABLE IF EXISTS parties CASCADE;
";
