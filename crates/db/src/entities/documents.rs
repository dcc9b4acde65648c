//! `SeaORM` Entity for the documents table.
//!
//! Rows point at objects in the document store; the bytes live there,
//! not in the database.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub employee_id: Uuid,
    pub insurance_id: Option<Uuid>,
    pub title: String,
    pub storage_key: String,
    pub content_type: String,
    pub file_size: i64,
    /// Document category: "PAYSLIP", "INSURANCE", or "EMPLOYEE".
    pub doc_type: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employees::Entity",
        from = "Column::EmployeeId",
        to = "super::employees::Column::Id"
    )]
    Employees,
    #[sea_orm(
        belongs_to = "super::insurance_records::Entity",
        from = "Column::InsuranceId",
        to = "super::insurance_records::Column::Id"
    )]
    InsuranceRecords,
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employees.def()
    }
}

impl Related<super::insurance_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InsuranceRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
