//! Payroll repository for runs and payslips.
//!
//! Run status strings are parsed through the core `PayrollStatus`
//! type; payslips may only be generated while a run is in draft.

use atria_core::payroll::{
    compute_totals, DeductionLines, EarningLines, PayPeriod, PayrollError, PayrollStatus,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{payroll_runs, payslips};

/// Input for generating one employee's payslip within a run.
#[derive(Debug, Clone)]
pub struct GeneratePayslipInput {
    pub employee_id: Uuid,
    pub earnings: EarningLines,
    pub deductions: DeductionLines,
}

/// Payroll repository for runs and payslips.
#[derive(Debug, Clone)]
pub struct PayrollRepository {
    db: DatabaseConnection,
}

fn db_err(err: sea_orm::DbErr) -> PayrollError {
    PayrollError::Database(err.to_string())
}

fn parse_status(raw: &str) -> Result<PayrollStatus, PayrollError> {
    PayrollStatus::parse(raw)
        .ok_or_else(|| PayrollError::Database(format!("unknown run status '{raw}' in database")))
}

impl PayrollRepository {
    /// Creates a new payroll repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a payroll run in draft for a validated period.
    ///
    /// # Errors
    ///
    /// Returns `PayrollError::Database` if the insert fails.
    pub async fn create_run(
        &self,
        period: PayPeriod,
        created_by: Uuid,
    ) -> Result<payroll_runs::Model, PayrollError> {
        let now = chrono::Utc::now().into();
        payroll_runs::ActiveModel {
            id: Set(Uuid::new_v4()),
            period_start: Set(period.start),
            period_end: Set(period.end),
            pay_date: Set(period.pay_date),
            status: Set(PayrollStatus::Draft.as_str().to_string()),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)
    }

    /// Lists payroll runs, newest period first.
    ///
    /// Returns the page of rows and the total count.
    ///
    /// # Errors
    ///
    /// Returns `PayrollError::Database` if the query fails.
    pub async fn list_runs(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<payroll_runs::Model>, u64), PayrollError> {
        let query = payroll_runs::Entity::find();
        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let rows = query
            .order_by_desc(payroll_runs::Column::PeriodEnd)
            .paginate(&self.db, limit.max(1))
            .fetch_page(offset / limit.max(1))
            .await
            .map_err(db_err)?;

        Ok((rows, total))
    }

    /// Finds a payroll run by ID.
    ///
    /// # Errors
    ///
    /// Returns `PayrollError::RunNotFound` if no row exists.
    pub async fn find_run(&self, id: Uuid) -> Result<payroll_runs::Model, PayrollError> {
        payroll_runs::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(PayrollError::RunNotFound(id))
    }

    /// Advances a run's status.
    ///
    /// # Errors
    ///
    /// Returns `PayrollError::RunNotFound` if no row exists.
    pub async fn set_run_status(
        &self,
        id: Uuid,
        status: PayrollStatus,
    ) -> Result<payroll_runs::Model, PayrollError> {
        let run = self.find_run(id).await?;
        let mut active: payroll_runs::ActiveModel = run.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(chrono::Utc::now().into());

        active.update(&self.db).await.map_err(db_err)
    }

    /// Generates a payslip for one employee within a draft run.
    ///
    /// Totals are computed here and stored so the persisted ledger is
    /// final. Payslips are immutable; regenerating for the same
    /// employee inserts a fresh record rather than editing the old one.
    ///
    /// # Errors
    ///
    /// Returns `PayrollError::RunNotEditable` when the run has left
    /// draft.
    pub async fn generate_payslip(
        &self,
        run_id: Uuid,
        input: GeneratePayslipInput,
    ) -> Result<payslips::Model, PayrollError> {
        let run = self.find_run(run_id).await?;
        let status = parse_status(&run.status)?;
        if !status.is_editable() {
            return Err(PayrollError::RunNotEditable {
                status: run.status.clone(),
            });
        }

        let totals = compute_totals(&input.earnings, &input.deductions);

        payslips::ActiveModel {
            id: Set(Uuid::new_v4()),
            run_id: Set(run_id),
            employee_id: Set(input.employee_id),
            basic: Set(input.earnings.basic),
            hra: Set(input.earnings.hra),
            conveyance: Set(input.earnings.conveyance),
            medical: Set(input.earnings.medical),
            bonus: Set(input.earnings.bonus),
            other_earnings: Set(input.earnings.other),
            epf: Set(input.deductions.epf),
            professional_tax: Set(input.deductions.professional_tax),
            other_deductions: Set(input.deductions.other),
            gross: Set(totals.gross),
            total_deductions: Set(totals.total_deductions),
            net: Set(totals.net),
            storage_key: Set(None),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)
    }

    /// Lists the payslips of a run.
    ///
    /// # Errors
    ///
    /// Returns `PayrollError::Database` if the query fails.
    pub async fn list_payslips(&self, run_id: Uuid) -> Result<Vec<payslips::Model>, PayrollError> {
        payslips::Entity::find()
            .filter(payslips::Column::RunId.eq(run_id))
            .order_by_asc(payslips::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Finds a payslip by ID.
    ///
    /// # Errors
    ///
    /// Returns `PayrollError::PayslipNotFound` if no row exists.
    pub async fn find_payslip(&self, id: Uuid) -> Result<payslips::Model, PayrollError> {
        payslips::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(PayrollError::PayslipNotFound(id))
    }

    /// Finds a payslip together with its run.
    ///
    /// # Errors
    ///
    /// Returns `PayrollError::PayslipNotFound` if either row is missing.
    pub async fn find_payslip_with_run(
        &self,
        id: Uuid,
    ) -> Result<(payslips::Model, payroll_runs::Model), PayrollError> {
        let result = payslips::Entity::find_by_id(id)
            .find_also_related(payroll_runs::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        match result {
            Some((slip, Some(run))) => Ok((slip, run)),
            _ => Err(PayrollError::PayslipNotFound(id)),
        }
    }

    /// Records the stored PDF location for a payslip.
    ///
    /// # Errors
    ///
    /// Returns `PayrollError::PayslipNotFound` if no row exists.
    pub async fn set_payslip_storage_key(
        &self,
        id: Uuid,
        storage_key: &str,
    ) -> Result<payslips::Model, PayrollError> {
        let slip = self.find_payslip(id).await?;
        let mut active: payslips::ActiveModel = slip.into();
        active.storage_key = Set(Some(storage_key.to_string()));

        active.update(&self.db).await.map_err(db_err)
    }

    /// Finds an employee's most recent payslip, with its run.
    ///
    /// # Errors
    ///
    /// Returns `PayrollError::Database` if the query fails.
    pub async fn latest_payslip_for_employee(
        &self,
        employee_id: Uuid,
    ) -> Result<Option<(payslips::Model, payroll_runs::Model)>, PayrollError> {
        let result = payslips::Entity::find()
            .filter(payslips::Column::EmployeeId.eq(employee_id))
            .find_also_related(payroll_runs::Entity)
            .order_by_desc(payslips::Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.and_then(|(slip, run)| run.map(|run| (slip, run))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("DRAFT", true)]
    #[case("APPROVED", true)]
    #[case("PAID", true)]
    #[case("OPEN", false)]
    #[case("", false)]
    fn test_parse_status(#[case] raw: &str, #[case] ok: bool) {
        if ok {
            assert!(parse_status(raw).is_ok());
        } else {
            assert!(matches!(parse_status(raw), Err(PayrollError::Database(_))));
        }
    }
}
