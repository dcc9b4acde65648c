//! `SeaORM` Entity for the leave_assignments table.
//!
//! One per-policy allotment within a batch.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "leave_assignments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub batch_id: Uuid,
    pub policy_id: Uuid,
    pub days: Decimal,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::leave_assignment_batches::Entity",
        from = "Column::BatchId",
        to = "super::leave_assignment_batches::Column::Id"
    )]
    LeaveAssignmentBatches,
    #[sea_orm(
        belongs_to = "super::leave_policies::Entity",
        from = "Column::PolicyId",
        to = "super::leave_policies::Column::Id"
    )]
    LeavePolicies,
}

impl Related<super::leave_assignment_batches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeaveAssignmentBatches.def()
    }
}

impl Related<super::leave_policies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeavePolicies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
