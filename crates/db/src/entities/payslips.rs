//! `SeaORM` Entity for the payslips table.
//!
//! Payslips are immutable once created; regeneration inserts a new
//! row. Derived columns are stored so the ledger a payslip shows
//! never shifts under later code changes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "payslips")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub run_id: Uuid,
    pub employee_id: Uuid,
    pub basic: Decimal,
    pub hra: Decimal,
    pub conveyance: Decimal,
    pub medical: Decimal,
    pub bonus: Decimal,
    pub other_earnings: Decimal,
    pub epf: Decimal,
    pub professional_tax: Decimal,
    pub other_deductions: Decimal,
    pub gross: Decimal,
    pub total_deductions: Decimal,
    pub net: Decimal,
    /// Key of the rendered PDF in the document store, once generated.
    pub storage_key: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::payroll_runs::Entity",
        from = "Column::RunId",
        to = "super::payroll_runs::Column::Id"
    )]
    PayrollRuns,
    #[sea_orm(
        belongs_to = "super::employees::Entity",
        from = "Column::EmployeeId",
        to = "super::employees::Column::Id"
    )]
    Employees,
}

impl Related<super::payroll_runs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PayrollRuns.def()
    }
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employees.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
