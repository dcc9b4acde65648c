//! `SeaORM` Entity for the leave_balances table.
//!
//! One row per (employee, policy) pair. Mutated only by batch
//! assignment and request approval.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "leave_balances")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub employee_id: Uuid,
    pub policy_id: Uuid,
    pub available: Decimal,
    pub used: Decimal,
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
