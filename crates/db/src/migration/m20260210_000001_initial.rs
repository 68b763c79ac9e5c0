//! Initial database migration.
//!
//! Creates the master tables, the monthly plan/actual store, the period
//! closing ledger, the raw SAP staging table, and the transfer audit log.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: MASTER REGISTRY
        // ============================================================
        db.execute_unprepared(VENDORS_SQL).await?;
        db.execute_unprepared(SERVICES_SQL).await?;
        db.execute_unprepared(BUDGET_CODES_SQL).await?;
        db.execute_unprepared(PROJECTS_SQL).await?;

        // ============================================================
        // PART 2: MONTHLY PLAN/ACTUAL STORE
        // ============================================================
        db.execute_unprepared(MONTHLY_RECORDS_SQL).await?;

        // ============================================================
        // PART 3: PERIOD CLOSING LEDGER
        // ============================================================
        db.execute_unprepared(PERIOD_CLOSINGS_SQL).await?;

        // ============================================================
        // PART 4: RAW SAP STAGING
        // ============================================================
        db.execute_unprepared(RAW_LEDGER_LINES_SQL).await?;

        // ============================================================
        // PART 5: TRANSFER AUDIT LOG
        // ============================================================
        db.execute_unprepared(BUDGET_TRANSFERS_SQL).await?;

        // ============================================================
        // PART 6: INDEXES
        // ============================================================
        db.execute_unprepared(INDEXES_SQL).await?;

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

const VENDORS_SQL: &str = r"
CREATE TABLE vendors (
    vendor_id VARCHAR(20) PRIMARY KEY,
    biz_reg_no VARCHAR(20) NOT NULL UNIQUE,
    vendor_name VARCHAR(100) NOT NULL,
    sap_vendor_cd VARCHAR(20),
    vendor_alias VARCHAR(200),
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const SERVICES_SQL: &str = r"
CREATE TABLE services (
    svc_id VARCHAR(20) PRIMARY KEY,
    svc_name VARCHAR(100) NOT NULL,
    contract_type VARCHAR(20),
    is_resident BOOLEAN NOT NULL DEFAULT FALSE,
    operator_names VARCHAR(200),
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const BUDGET_CODES_SQL: &str = r"
CREATE TABLE budget_codes (
    code_id VARCHAR(20) PRIMARY KEY,
    code_name VARCHAR(100) NOT NULL,
    parent_code_id VARCHAR(20),
    code_type VARCHAR(50) NOT NULL,
    sort_order INTEGER NOT NULL DEFAULT 0,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const PROJECTS_SQL: &str = r"
CREATE TABLE projects (
    proj_id VARCHAR(20) PRIMARY KEY,
    proj_name VARCHAR(200) NOT NULL,
    fiscal_year VARCHAR(4) NOT NULL,
    dept_code VARCHAR(10) NOT NULL,
    prev_proj_id VARCHAR(20),
    continuity_status VARCHAR(20),
    status_prev_year VARCHAR(50),
    gl_account VARCHAR(20),
    gl_account_name VARCHAR(100),
    cost_center_code VARCHAR(20),
    cost_center_name VARCHAR(100),
    vendor_id VARCHAR(20) REFERENCES vendors(vendor_id),
    vendor_name_text VARCHAR(100),
    svc_id VARCHAR(20) REFERENCES services(svc_id),
    contract_period VARCHAR(50),
    budget_l2 VARCHAR(100),
    budget_it_type VARCHAR(50),
    proj_status VARCHAR(20) NOT NULL DEFAULT 'PENDING',
    memo TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE (proj_id, fiscal_year)
);
";

const MONTHLY_RECORDS_SQL: &str = r"
CREATE TABLE monthly_records (
    data_id BIGSERIAL PRIMARY KEY,
    proj_id VARCHAR(20) NOT NULL REFERENCES projects(proj_id),
    yyyymm VARCHAR(6) NOT NULL,
    plan_amt NUMERIC(15, 0) NOT NULL DEFAULT 0,
    actual_amt NUMERIC(15, 0) NOT NULL DEFAULT 0,
    est_amt NUMERIC(15, 0) NOT NULL DEFAULT 0,
    confirmed_amt NUMERIC(15, 0) NOT NULL DEFAULT 0,
    is_actual_finalized BOOLEAN NOT NULL DEFAULT FALSE,
    remark VARCHAR(500),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE (proj_id, yyyymm)
);
";

const PERIOD_CLOSINGS_SQL: &str = r"
CREATE TABLE period_closings (
    yyyymm VARCHAR(6) PRIMARY KEY,
    close_status VARCHAR(20) NOT NULL DEFAULT 'OPEN',
    closed_by VARCHAR(50),
    closed_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const RAW_LEDGER_LINES_SQL: &str = r"
CREATE TABLE raw_ledger_lines (
    raw_id BIGSERIAL PRIMARY KEY,
    yyyymm VARCHAR(6) NOT NULL,
    fiscal_year VARCHAR(4) NOT NULL,
    slip_no VARCHAR(50) NOT NULL,
    line_item INTEGER NOT NULL DEFAULT 0,
    gl_account VARCHAR(20) NOT NULL DEFAULT '',
    gl_desc VARCHAR(100),
    header_text VARCHAR(200) NOT NULL DEFAULT '',
    amt_val NUMERIC(15, 0) NOT NULL DEFAULT 0,
    currency VARCHAR(10) NOT NULL DEFAULT 'KRW',
    vendor_text VARCHAR(100),
    ref_key VARCHAR(100),
    cost_center VARCHAR(20),
    mapped_proj_id VARCHAR(20) REFERENCES projects(proj_id) ON DELETE SET NULL,
    mapping_status VARCHAR(20) NOT NULL DEFAULT 'UNMAPPED',
    uploaded_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE (fiscal_year, slip_no, line_item)
);
";

const BUDGET_TRANSFERS_SQL: &str = r"
CREATE TABLE budget_transfers (
    transfer_id BIGSERIAL PRIMARY KEY,
    from_proj_id VARCHAR(20) NOT NULL,
    to_proj_id VARCHAR(20) NOT NULL,
    transfer_amount NUMERIC(15, 0) NOT NULL,
    transfer_yyyymm VARCHAR(6) NOT NULL,
    reason TEXT,
    transferred_by VARCHAR(50),
    transferred_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const INDEXES_SQL: &str = r"
CREATE INDEX idx_projects_dept_code ON projects(dept_code);
CREATE INDEX idx_monthly_records_yyyymm ON monthly_records(yyyymm);
CREATE INDEX idx_raw_ledger_lines_mapping_status ON raw_ledger_lines(mapping_status);
CREATE INDEX idx_raw_ledger_lines_slip_no ON raw_ledger_lines(slip_no);
CREATE INDEX idx_budget_transfers_yyyymm ON budget_transfers(transfer_yyyymm);
CREATE INDEX idx_budget_codes_type ON budget_codes(code_type);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS budget_transfers;
DROP TABLE IF EXISTS raw_ledger_lines;
DROP TABLE IF EXISTS period_closings;
DROP TABLE IF EXISTS monthly_records;
DROP TABLE IF EXISTS projects;
DROP TABLE IF EXISTS budget_codes;
DROP TABLE IF EXISTS services;
DROP TABLE IF EXISTS vendors;
";
