//! Batch assignment repository.
//!
//! Persists validated assignment plans and reverses them within the
//! undo window. Balance rows are upserted per policy inside the same
//! transaction as the batch itself.

use atria_core::leave::{AssignmentPlan, LeaveError, check_undo_window};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{leave_assignment_batches, leave_assignments, leave_balances};

/// A persisted batch together with its per-policy entries.
#[derive(Debug, Clone)]
pub struct BatchWithEntries {
    pub batch: leave_assignment_batches::Model,
    pub entries: Vec<leave_assignments::Model>,
}

/// Assignment repository for batch grant and undo.
#[derive(Debug, Clone)]
pub struct AssignmentRepository {
    db: DatabaseConnection,
}

fn db_err(err: sea_orm::DbErr) -> LeaveError {
    LeaveError::Database(err.to_string())
}

impl AssignmentRepository {
    /// Creates a new assignment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Persists an assignment plan as a batch and tops up balances.
    ///
    /// Runs inside a transaction: the batch row, its entries, and the
    /// balance increments commit together.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::Database` if any write fails.
    pub async fn assign_batch(
        &self,
        plan: &AssignmentPlan,
        created_by: Uuid,
    ) -> Result<BatchWithEntries, LeaveError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let now: chrono::DateTime<chrono::FixedOffset> = chrono::Utc::now().into();

        let batch = leave_assignment_batches::ActiveModel {
            id: Set(Uuid::new_v4()),
            employee_id: Set(plan.employee_id),
            created_by: Set(created_by),
            allow_carry_forward: Set(plan.options.allow_carry_forward),
            allow_encashment: Set(plan.options.allow_encashment),
            valid_from: Set(plan.options.valid_from),
            valid_until: Set(plan.options.valid_until),
            notify: Set(plan.options.notify),
            reversed_at: Set(None),
            created_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        let mut entries = Vec::with_capacity(plan.entries.len());
        for entry in &plan.entries {
            let row = leave_assignments::ActiveModel {
                id: Set(Uuid::new_v4()),
                batch_id: Set(batch.id),
                policy_id: Set(entry.policy_id),
                days: Set(entry.days),
                created_at: Set(now),
            }
            .insert(&txn)
            .await
            .map_err(db_err)?;

            Self::credit_balance(&txn, plan.employee_id, entry.policy_id, entry.days).await?;
            entries.push(row);
        }

        txn.commit().await.map_err(db_err)?;
        Ok(BatchWithEntries { batch, entries })
    }

    async fn credit_balance(
        txn: &DatabaseTransaction,
        employee_id: Uuid,
        policy_id: Uuid,
        days: Decimal,
    ) -> Result<(), LeaveError> {
        let existing = leave_balances::Entity::find()
            .filter(leave_balances::Column::EmployeeId.eq(employee_id))
            .filter(leave_balances::Column::PolicyId.eq(policy_id))
            .one(txn)
            .await
            .map_err(db_err)?;

        match existing {
            Some(balance) => {
                let available = balance.available + days;
                let mut active: leave_balances::ActiveModel = balance.into();
                active.available = Set(available);
                active.updated_at = Set(chrono::Utc::now().into());
                active.update(txn).await.map_err(db_err)?;
            }
            None => {
                leave_balances::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    employee_id: Set(employee_id),
                    policy_id: Set(policy_id),
                    available: Set(days),
                    used: Set(Decimal::ZERO),
                    updated_at: Set(chrono::Utc::now().into()),
                }
                .insert(txn)
                .await
                .map_err(db_err)?;
            }
        }

        Ok(())
    }

    /// Finds a batch with its entries.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::BatchNotFound` if no row exists.
    pub async fn find_batch(&self, id: Uuid) -> Result<BatchWithEntries, LeaveError> {
        let batch = leave_assignment_batches::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(LeaveError::BatchNotFound(id))?;

        let entries = leave_assignments::Entity::find()
            .filter(leave_assignments::Column::BatchId.eq(id))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(BatchWithEntries { batch, entries })
    }

    /// Lists an employee's batches, newest first.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::Database` if the query fails.
    pub async fn list_batches(
        &self,
        employee_id: Uuid,
    ) -> Result<Vec<leave_assignment_batches::Model>, LeaveError> {
        leave_assignment_batches::Entity::find()
            .filter(leave_assignment_batches::Column::EmployeeId.eq(employee_id))
            .order_by_desc(leave_assignment_batches::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Reverses a batch within the undo window.
    ///
    /// Subtracts each entry's days from the matching balance, clamped
    /// at zero when days have already been consumed, and stamps the
    /// batch as reversed. Runs inside a transaction.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::BatchAlreadyReversed` for a second undo or
    /// `LeaveError::UndoWindowElapsed` past the window.
    pub async fn undo_batch(&self, id: Uuid) -> Result<BatchWithEntries, LeaveError> {
        let BatchWithEntries { batch, entries } = self.find_batch(id).await?;

        if batch.reversed_at.is_some() {
            return Err(LeaveError::BatchAlreadyReversed);
        }
        check_undo_window(batch.created_at.to_utc(), chrono::Utc::now())?;

        let txn = self.db.begin().await.map_err(db_err)?;

        for entry in &entries {
            Self::debit_balance(&txn, batch.employee_id, entry.policy_id, entry.days).await?;
        }

        let mut active: leave_assignment_batches::ActiveModel = batch.into();
        active.reversed_at = Set(Some(chrono::Utc::now().into()));
        let batch = active.update(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(BatchWithEntries { batch, entries })
    }

    async fn debit_balance(
        txn: &DatabaseTransaction,
        employee_id: Uuid,
        policy_id: Uuid,
        days: Decimal,
    ) -> Result<(), LeaveError> {
        let existing = leave_balances::Entity::find()
            .filter(leave_balances::Column::EmployeeId.eq(employee_id))
            .filter(leave_balances::Column::PolicyId.eq(policy_id))
            .one(txn)
            .await
            .map_err(db_err)?;

        // A missing row means the balance was removed out of band;
        // nothing left to reverse for this policy.
        let Some(balance) = existing else {
            return Ok(());
        };

        let available = (balance.available - days).max(Decimal::ZERO);
        let mut active: leave_balances::ActiveModel = balance.into();
        active.available = Set(available);
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(txn).await.map_err(db_err)?;

        Ok(())
    }
}
