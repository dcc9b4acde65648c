//! `SeaORM` Entity for the leave_requests table.
//!
//! Status strings are parsed through the core `LeaveStatus` type;
//! rows are never deleted, cancellation is a status transition.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "leave_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub employee_id: Uuid,
    pub policy_id: Uuid,
    pub start_date: Date,
    pub end_date: Date,
    pub days: Decimal,
    pub half_day: bool,
    pub reason: Option<String>,
    pub status: String,
    pub submitted_at: Option<DateTimeWithTimeZone>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTimeWithTimeZone>,
    pub review_note: Option<String>,
    pub cancelled_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
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
        belongs_to = "super::leave_policies::Entity",
        from = "Column::PolicyId",
        to = "super::leave_policies::Column::Id"
    )]
    LeavePolicies,
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employees.def()
    }
}

impl Related<super::leave_policies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeavePolicies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
