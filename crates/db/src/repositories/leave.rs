//! Leave repository bridging the workflow state machine to persistence.
//!
//! All transitions go through `LeaveWorkflow` so that the state machine
//! is enforced in exactly one place. Approval moves days from available
//! to used inside a transaction.

use atria_core::leave::{LeaveAction, LeaveError, LeaveStatus, LeaveWorkflow};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{leave_balances, leave_policies, leave_requests};

/// Input for creating a leave request.
#[derive(Debug, Clone)]
pub struct CreateLeaveRequestInput {
    pub employee_id: Uuid,
    pub policy_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub half_day: bool,
    pub reason: Option<String>,
}

/// Leave repository for requests, policies, and balances.
#[derive(Debug, Clone)]
pub struct LeaveRepository {
    db: DatabaseConnection,
}

fn db_err(err: sea_orm::DbErr) -> LeaveError {
    LeaveError::Database(err.to_string())
}

fn parse_status(raw: &str) -> Result<LeaveStatus, LeaveError> {
    LeaveStatus::parse(raw)
        .ok_or_else(|| LeaveError::Database(format!("unknown leave status '{raw}' in database")))
}

impl LeaveRepository {
    /// Creates a new leave repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all leave policies.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::Database` if the query fails.
    pub async fn list_policies(&self) -> Result<Vec<leave_policies::Model>, LeaveError> {
        leave_policies::Entity::find()
            .order_by_asc(leave_policies::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Creates a leave policy.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::Database` if the insert fails.
    pub async fn create_policy(
        &self,
        name: &str,
        period: &str,
        max_per_period: Option<Decimal>,
    ) -> Result<leave_policies::Model, LeaveError> {
        leave_policies::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            period: Set(period.to_string()),
            max_per_period: Set(max_per_period),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)
    }

    /// Lists an employee's balances across all policies.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::Database` if the query fails.
    pub async fn get_balances(
        &self,
        employee_id: Uuid,
    ) -> Result<Vec<(leave_balances::Model, Option<leave_policies::Model>)>, LeaveError> {
        leave_balances::Entity::find()
            .filter(leave_balances::Column::EmployeeId.eq(employee_id))
            .find_also_related(leave_policies::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Lists leave requests, optionally scoped to one employee.
    ///
    /// Returns the page of rows and the total count, newest first.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::Database` if the query fails.
    pub async fn list_requests(
        &self,
        employee_id: Option<Uuid>,
        status: Option<LeaveStatus>,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<leave_requests::Model>, u64), LeaveError> {
        let mut query = leave_requests::Entity::find();

        if let Some(employee_id) = employee_id {
            query = query.filter(leave_requests::Column::EmployeeId.eq(employee_id));
        }
        if let Some(status) = status {
            query = query.filter(leave_requests::Column::Status.eq(status.as_str()));
        }

        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let rows = query
            .order_by_desc(leave_requests::Column::CreatedAt)
            .paginate(&self.db, limit.max(1))
            .fetch_page(offset / limit.max(1))
            .await
            .map_err(db_err)?;

        Ok((rows, total))
    }

    /// Finds a leave request by ID.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::RequestNotFound` if no row exists.
    pub async fn find_request(&self, id: Uuid) -> Result<leave_requests::Model, LeaveError> {
        leave_requests::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(LeaveError::RequestNotFound(id))
    }

    /// Creates and submits a leave request in one step.
    ///
    /// The request is born in `Draft` and immediately run through the
    /// submit transition, so the stored row is `Pending` with its day
    /// count computed and validated.
    ///
    /// # Errors
    ///
    /// Returns a validation error from the workflow or
    /// `LeaveError::Database` if the insert fails.
    pub async fn create_request(
        &self,
        input: CreateLeaveRequestInput,
    ) -> Result<leave_requests::Model, LeaveError> {
        let action = LeaveWorkflow::submit(
            LeaveStatus::Draft,
            input.start_date,
            input.end_date,
            input.half_day,
        )?;

        let LeaveAction::Submit {
            new_status,
            days,
            submitted_at,
        } = action
        else {
            return Err(LeaveError::Database(
                "submit produced an unexpected action".to_string(),
            ));
        };

        let now = chrono::Utc::now().into();
        leave_requests::ActiveModel {
            id: Set(Uuid::new_v4()),
            employee_id: Set(input.employee_id),
            policy_id: Set(input.policy_id),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date.unwrap_or(input.start_date)),
            days: Set(days),
            half_day: Set(input.half_day),
            reason: Set(input.reason),
            status: Set(new_status.as_str().to_string()),
            submitted_at: Set(Some(submitted_at.into())),
            reviewed_by: Set(None),
            reviewed_at: Set(None),
            review_note: Set(None),
            cancelled_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)
    }

    /// Approves a pending request and deducts the balance.
    ///
    /// Runs inside a transaction: the status update and the move of
    /// days from available to used either both happen or neither does.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::InvalidTransition` if the request is not
    /// pending, or `LeaveError::InsufficientBalance` if the employee's
    /// balance cannot cover the request.
    pub async fn approve_request(
        &self,
        id: Uuid,
        reviewed_by: Uuid,
    ) -> Result<leave_requests::Model, LeaveError> {
        let request = self.find_request(id).await?;
        let status = parse_status(&request.status)?;
        let action = LeaveWorkflow::approve(status, reviewed_by)?;

        let LeaveAction::Approve {
            new_status,
            reviewed_by,
            reviewed_at,
        } = action
        else {
            return Err(LeaveError::Database(
                "approve produced an unexpected action".to_string(),
            ));
        };

        let txn = self.db.begin().await.map_err(db_err)?;

        Self::deduct_balance(&txn, request.employee_id, request.policy_id, request.days).await?;

        let mut active: leave_requests::ActiveModel = request.into();
        active.status = Set(new_status.as_str().to_string());
        active.reviewed_by = Set(Some(reviewed_by));
        active.reviewed_at = Set(Some(reviewed_at.into()));
        active.updated_at = Set(chrono::Utc::now().into());
        let updated = active.update(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(updated)
    }

    async fn deduct_balance(
        txn: &DatabaseTransaction,
        employee_id: Uuid,
        policy_id: Uuid,
        days: Decimal,
    ) -> Result<(), LeaveError> {
        let balance = leave_balances::Entity::find()
            .filter(leave_balances::Column::EmployeeId.eq(employee_id))
            .filter(leave_balances::Column::PolicyId.eq(policy_id))
            .one(txn)
            .await
            .map_err(db_err)?;

        let Some(balance) = balance else {
            return Err(LeaveError::InsufficientBalance {
                requested: days,
                available: Decimal::ZERO,
            });
        };

        if balance.available < days {
            return Err(LeaveError::InsufficientBalance {
                requested: days,
                available: balance.available,
            });
        }

        let available = balance.available - days;
        let used = balance.used + days;
        let mut active: leave_balances::ActiveModel = balance.into();
        active.available = Set(available);
        active.used = Set(used);
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(txn).await.map_err(db_err)?;

        Ok(())
    }

    /// Rejects a pending request with an optional note.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::InvalidTransition` if the request is not
    /// pending.
    pub async fn reject_request(
        &self,
        id: Uuid,
        reviewed_by: Uuid,
        review_note: Option<String>,
    ) -> Result<leave_requests::Model, LeaveError> {
        let request = self.find_request(id).await?;
        let status = parse_status(&request.status)?;
        let action = LeaveWorkflow::reject(status, reviewed_by, review_note)?;

        let LeaveAction::Reject {
            new_status,
            reviewed_by,
            reviewed_at,
            review_note,
        } = action
        else {
            return Err(LeaveError::Database(
                "reject produced an unexpected action".to_string(),
            ));
        };

        let mut active: leave_requests::ActiveModel = request.into();
        active.status = Set(new_status.as_str().to_string());
        active.reviewed_by = Set(Some(reviewed_by));
        active.reviewed_at = Set(Some(reviewed_at.into()));
        active.review_note = Set(review_note);
        active.updated_at = Set(chrono::Utc::now().into());

        active.update(&self.db).await.map_err(db_err)
    }

    /// Cancels a pending request on behalf of its owner.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::NotRequestOwner` if `employee_id` does not
    /// own the request, or `LeaveError::InvalidTransition` if the
    /// request is not pending.
    pub async fn cancel_request(
        &self,
        id: Uuid,
        employee_id: Uuid,
    ) -> Result<leave_requests::Model, LeaveError> {
        let request = self.find_request(id).await?;
        if request.employee_id != employee_id {
            return Err(LeaveError::NotRequestOwner);
        }

        let status = parse_status(&request.status)?;
        let action = LeaveWorkflow::cancel(status)?;

        let LeaveAction::Cancel {
            new_status,
            cancelled_at,
        } = action
        else {
            return Err(LeaveError::Database(
                "cancel produced an unexpected action".to_string(),
            ));
        };

        let mut active: leave_requests::ActiveModel = request.into();
        active.status = Set(new_status.as_str().to_string());
        active.cancelled_at = Set(Some(cancelled_at.into()));
        active.updated_at = Set(chrono::Utc::now().into());

        active.update(&self.db).await.map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("DRAFT", true)]
    #[case("PENDING", true)]
    #[case("APPROVED", true)]
    #[case("LIMBO", false)]
    #[case("", false)]
    fn test_parse_status(#[case] raw: &str, #[case] ok: bool) {
        if ok {
            assert!(parse_status(raw).is_ok());
        } else {
            assert!(matches!(parse_status(raw), Err(LeaveError::Database(_))));
        }
    }
}
