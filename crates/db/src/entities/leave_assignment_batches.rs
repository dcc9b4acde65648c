//! `SeaORM` Entity for the leave_assignment_batches table.
//!
//! A batch groups the per-policy allotments of one assignment
//! operation so it can be reversed as a unit within the undo window.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "leave_assignment_batches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub employee_id: Uuid,
    pub created_by: Uuid,
    pub allow_carry_forward: bool,
    pub allow_encashment: bool,
    pub valid_from: Option<Date>,
    pub valid_until: Option<Date>,
    pub notify: bool,
    pub reversed_at: Option<DateTimeWithTimeZone>,
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
    #[sea_orm(has_many = "super::leave_assignments::Entity")]
    LeaveAssignments,
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employees.def()
    }
}

impl Related<super::leave_assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeaveAssignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
