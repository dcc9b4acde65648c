//! `SeaORM` Entity for the leave_policies table.
//!
//! Immutable reference data; balances and requests point at it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "leave_policies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    /// Replenishment period, e.g. "Annual".
    pub period: String,
    pub max_per_period: Option<Decimal>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::leave_balances::Entity")]
    LeaveBalances,
}

impl Related<super::leave_balances::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeaveBalances.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
