//! Insurance repository for policy records and their documents.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::insurance_records;

/// Input for creating an insurance record.
#[derive(Debug, Clone)]
pub struct CreateInsuranceInput {
    pub employee_id: Uuid,
    pub policy_number: String,
    pub provider: String,
    pub coverage_amount: Decimal,
    pub bonus_percent: Option<Decimal>,
    pub convenience_fee: Option<Decimal>,
    pub e_cash_amount: Option<Decimal>,
}

/// Input for updating an insurance record. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateInsuranceInput {
    pub policy_number: Option<String>,
    pub provider: Option<String>,
    pub coverage_amount: Option<Decimal>,
    pub bonus_percent: Option<Decimal>,
    pub convenience_fee: Option<Decimal>,
    pub e_cash_amount: Option<Decimal>,
}

/// Insurance repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct InsuranceRepository {
    db: DatabaseConnection,
}

impl InsuranceRepository {
    /// Creates a new insurance repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds an insurance record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<insurance_records::Model>, DbErr> {
        insurance_records::Entity::find_by_id(id).one(&self.db).await
    }

    /// Lists an employee's insurance records, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_employee(
        &self,
        employee_id: Uuid,
    ) -> Result<Vec<insurance_records::Model>, DbErr> {
        insurance_records::Entity::find()
            .filter(insurance_records::Column::EmployeeId.eq(employee_id))
            .order_by_desc(insurance_records::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Creates an insurance record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        input: CreateInsuranceInput,
    ) -> Result<insurance_records::Model, DbErr> {
        let now = chrono::Utc::now().into();
        insurance_records::ActiveModel {
            id: Set(Uuid::new_v4()),
            employee_id: Set(input.employee_id),
            policy_number: Set(input.policy_number),
            provider: Set(input.provider),
            coverage_amount: Set(input.coverage_amount),
            bonus_percent: Set(input.bonus_percent),
            convenience_fee: Set(input.convenience_fee),
            e_cash_amount: Set(input.e_cash_amount),
            ctc_storage_key: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
    }

    /// Updates an insurance record. Unset input fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateInsuranceInput,
    ) -> Result<Option<insurance_records::Model>, DbErr> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: insurance_records::ActiveModel = existing.into();

        if let Some(v) = input.policy_number {
            active.policy_number = Set(v);
        }
        if let Some(v) = input.provider {
            active.provider = Set(v);
        }
        if let Some(v) = input.coverage_amount {
            active.coverage_amount = Set(v);
        }
        if let Some(v) = input.bonus_percent {
            active.bonus_percent = Set(Some(v));
        }
        if let Some(v) = input.convenience_fee {
            active.convenience_fee = Set(Some(v));
        }
        if let Some(v) = input.e_cash_amount {
            active.e_cash_amount = Set(Some(v));
        }
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(Some(updated))
    }

    /// Records the stored CTC breakdown location for a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn set_ctc_storage_key(
        &self,
        id: Uuid,
        storage_key: &str,
    ) -> Result<Option<insurance_records::Model>, DbErr> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: insurance_records::ActiveModel = existing.into();
        active.ctc_storage_key = Set(Some(storage_key.to_string()));
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(Some(updated))
    }

    /// Deletes an insurance record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = insurance_records::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
