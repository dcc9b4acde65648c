//! Initial schema: employees, leave, payroll, and insurance tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(INITIAL_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS documents, insurance_records, payslips, payroll_runs, \
             leave_assignments, leave_assignment_batches, leave_requests, leave_balances, \
             leave_policies, bank_details, users, employees CASCADE;",
        )
        .await?;
        Ok(())
    }
}

const INITIAL_SQL: &str = r"
-- Employee master data
CREATE TABLE employees (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    person_no VARCHAR(32) NOT NULL UNIQUE,
    first_name VARCHAR(100) NOT NULL,
    last_name VARCHAR(100) NOT NULL,
    work_email VARCHAR(255) NOT NULL UNIQUE,
    personal_email VARCHAR(255),
    phone VARCHAR(32),
    department VARCHAR(100),
    designation VARCHAR(100),
    location VARCHAR(100),
    status VARCHAR(16) NOT NULL DEFAULT 'ACTIVE',
    hire_date DATE,
    gender VARCHAR(16),
    address TEXT,
    emergency_contact VARCHAR(255),
    education_qualification VARCHAR(255),
    birthdate DATE,
    manager_id UUID REFERENCES employees(id) ON DELETE SET NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_employee_status CHECK (status IN ('ACTIVE', 'INACTIVE'))
);

CREATE INDEX idx_employees_status ON employees(status);
CREATE INDEX idx_employees_department ON employees(department);

-- Login accounts
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    full_name VARCHAR(255) NOT NULL,
    role VARCHAR(16) NOT NULL DEFAULT 'EMPLOYEE',
    employee_id UUID REFERENCES employees(id) ON DELETE SET NULL,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_user_role CHECK (role IN ('ADMIN', 'HR', 'MANAGER', 'EMPLOYEE'))
);

-- Bank details, one owned sub-record per employee
CREATE TABLE bank_details (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    employee_id UUID NOT NULL UNIQUE REFERENCES employees(id) ON DELETE CASCADE,
    bank_name VARCHAR(255) NOT NULL,
    account_number VARCHAR(64) NOT NULL,
    ifsc_code VARCHAR(16) NOT NULL,
    branch VARCHAR(255),
    pf_number VARCHAR(64),
    uan VARCHAR(64),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Leave policy catalog (reference data)
CREATE TABLE leave_policies (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(100) NOT NULL UNIQUE,
    period VARCHAR(32) NOT NULL DEFAULT 'Annual',
    max_per_period NUMERIC(6, 2),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Per-employee leave balances
CREATE TABLE leave_balances (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    employee_id UUID NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
    policy_id UUID NOT NULL REFERENCES leave_policies(id) ON DELETE CASCADE,
    available NUMERIC(6, 2) NOT NULL DEFAULT 0,
    used NUMERIC(6, 2) NOT NULL DEFAULT 0,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_balance_employee_policy UNIQUE (employee_id, policy_id),
    CONSTRAINT chk_balance_non_negative CHECK (available >= 0 AND used >= 0)
);

-- Leave requests; rows are never deleted, cancellation is a status change
CREATE TABLE leave_requests (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    employee_id UUID NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
    policy_id UUID NOT NULL REFERENCES leave_policies(id),
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    days NUMERIC(5, 1) NOT NULL,
    half_day BOOLEAN NOT NULL DEFAULT FALSE,
    reason TEXT,
    status VARCHAR(16) NOT NULL DEFAULT 'PENDING',
    submitted_at TIMESTAMPTZ,
    reviewed_by UUID REFERENCES users(id),
    reviewed_at TIMESTAMPTZ,
    review_note TEXT,
    cancelled_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_request_dates CHECK (end_date >= start_date),
    CONSTRAINT chk_request_days CHECK (days > 0 AND days <= 365),
    CONSTRAINT chk_request_status CHECK (
        status IN ('DRAFT', 'PENDING', 'APPROVED', 'REJECTED', 'CANCELLED', 'REVIEW', 'EXPIRED')
    )
);

CREATE INDEX idx_leave_requests_employee ON leave_requests(employee_id, created_at DESC);
CREATE INDEX idx_leave_requests_status ON leave_requests(status) WHERE status = 'PENDING';

-- Assignment batches; reversible as a unit within the undo window
CREATE TABLE leave_assignment_batches (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    employee_id UUID NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
    created_by UUID NOT NULL REFERENCES users(id),
    allow_carry_forward BOOLEAN NOT NULL DEFAULT FALSE,
    allow_encashment BOOLEAN NOT NULL DEFAULT FALSE,
    valid_from DATE,
    valid_until DATE,
    notify BOOLEAN NOT NULL DEFAULT TRUE,
    reversed_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_assignment_batches_employee ON leave_assignment_batches(employee_id, created_at DESC);

CREATE TABLE leave_assignments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    batch_id UUID NOT NULL REFERENCES leave_assignment_batches(id) ON DELETE CASCADE,
    policy_id UUID NOT NULL REFERENCES leave_policies(id),
    days NUMERIC(6, 2) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_assignment_days CHECK (days > 0)
);

-- Payroll runs, one per pay period
CREATE TABLE payroll_runs (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    period_start DATE NOT NULL,
    period_end DATE NOT NULL,
    pay_date DATE NOT NULL,
    status VARCHAR(16) NOT NULL DEFAULT 'DRAFT',
    created_by UUID NOT NULL REFERENCES users(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_run_period CHECK (period_end >= period_start),
    CONSTRAINT chk_run_status CHECK (status IN ('DRAFT', 'APPROVED', 'PAID'))
);

-- Payslips are immutable once created; regeneration inserts a new row
CREATE TABLE payslips (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    run_id UUID NOT NULL REFERENCES payroll_runs(id) ON DELETE CASCADE,
    employee_id UUID NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
    basic NUMERIC(12, 2) NOT NULL DEFAULT 0,
    hra NUMERIC(12, 2) NOT NULL DEFAULT 0,
    conveyance NUMERIC(12, 2) NOT NULL DEFAULT 0,
    medical NUMERIC(12, 2) NOT NULL DEFAULT 0,
    bonus NUMERIC(12, 2) NOT NULL DEFAULT 0,
    other_earnings NUMERIC(12, 2) NOT NULL DEFAULT 0,
    epf NUMERIC(12, 2) NOT NULL DEFAULT 0,
    professional_tax NUMERIC(12, 2) NOT NULL DEFAULT 0,
    other_deductions NUMERIC(12, 2) NOT NULL DEFAULT 0,
    gross NUMERIC(12, 2) NOT NULL,
    total_deductions NUMERIC(12, 2) NOT NULL,
    net NUMERIC(12, 2) NOT NULL,
    storage_key VARCHAR(512),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_payslip_net CHECK (net >= 0)
);

CREATE INDEX idx_payslips_employee ON payslips(employee_id, created_at DESC);

-- Insurance records
CREATE TABLE insurance_records (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    employee_id UUID NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
    policy_number VARCHAR(64) NOT NULL,
    provider VARCHAR(255) NOT NULL,
    coverage_amount NUMERIC(14, 2) NOT NULL,
    bonus_percent NUMERIC(5, 2),
    convenience_fee NUMERIC(12, 2),
    e_cash_amount NUMERIC(12, 2),
    ctc_storage_key VARCHAR(512),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_insurance_employee ON insurance_records(employee_id);

-- Stored document metadata; bytes live in the object store
CREATE TABLE documents (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    employee_id UUID NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
    insurance_id UUID REFERENCES insurance_records(id) ON DELETE SET NULL,
    title VARCHAR(255) NOT NULL,
    storage_key VARCHAR(512) NOT NULL,
    content_type VARCHAR(128) NOT NULL,
    file_size BIGINT NOT NULL,
    doc_type VARCHAR(16) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_doc_type CHECK (doc_type IN ('PAYSLIP', 'INSURANCE', 'EMPLOYEE'))
);

CREATE INDEX idx_documents_employee ON documents(employee_id, created_at DESC);
";
