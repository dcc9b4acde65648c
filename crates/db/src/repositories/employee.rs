//! Employee repository for master data, bank details, and documents.

use atria_core::employee::EmployeeStatus;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{bank_details, documents, employees};

/// Input for creating an employee.
#[derive(Debug, Clone)]
pub struct CreateEmployeeInput {
    pub person_no: String,
    pub first_name: String,
    pub last_name: String,
    pub work_email: String,
    pub personal_email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub location: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub education_qualification: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub manager_id: Option<Uuid>,
}

/// Input for updating an employee. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateEmployeeInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub work_email: Option<String>,
    pub personal_email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub location: Option<String>,
    pub status: Option<EmployeeStatus>,
    pub hire_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub education_qualification: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub manager_id: Option<Option<Uuid>>,
}

/// Input for creating or replacing an employee's bank details.
#[derive(Debug, Clone)]
pub struct UpsertBankDetailsInput {
    pub bank_name: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub branch: Option<String>,
    pub pf_number: Option<String>,
    pub uan: Option<String>,
}

/// Filter for listing employees.
#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
    /// Restrict to a status.
    pub status: Option<EmployeeStatus>,
    /// Restrict to a department.
    pub department: Option<String>,
}

/// Employee repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    db: DatabaseConnection,
}

impl EmployeeRepository {
    /// Creates a new employee repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds an employee by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<employees::Model>, DbErr> {
        employees::Entity::find_by_id(id).one(&self.db).await
    }

    /// Finds an employee together with their bank details.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_with_bank_details(
        &self,
        id: Uuid,
    ) -> Result<Option<(employees::Model, Option<bank_details::Model>)>, DbErr> {
        let result = employees::Entity::find_by_id(id)
            .find_also_related(bank_details::Entity)
            .one(&self.db)
            .await?;

        Ok(result)
    }

    /// Lists employees with filtering and pagination.
    ///
    /// Returns the page of rows and the total count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: &EmployeeFilter,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<employees::Model>, u64), DbErr> {
        let mut query = employees::Entity::find();

        if let Some(status) = filter.status {
            query = query.filter(employees::Column::Status.eq(status.as_str()));
        }
        if let Some(department) = &filter.department {
            query = query.filter(employees::Column::Department.eq(department));
        }

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_asc(employees::Column::PersonNo)
            .paginate(&self.db, limit.max(1))
            .fetch_page(offset / limit.max(1))
            .await?;

        Ok((rows, total))
    }

    /// Checks if a person number is already taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn person_no_exists(&self, person_no: &str) -> Result<bool, DbErr> {
        let count = employees::Entity::find()
            .filter(employees::Column::PersonNo.eq(person_no))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Creates a new employee record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateEmployeeInput) -> Result<employees::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let employee = employees::ActiveModel {
            id: Set(Uuid::new_v4()),
            person_no: Set(input.person_no),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            work_email: Set(input.work_email),
            personal_email: Set(input.personal_email),
            phone: Set(input.phone),
            department: Set(input.department),
            designation: Set(input.designation),
            location: Set(input.location),
            status: Set(EmployeeStatus::Active.as_str().to_string()),
            hire_date: Set(input.hire_date),
            gender: Set(input.gender),
            address: Set(input.address),
            emergency_contact: Set(input.emergency_contact),
            education_qualification: Set(input.education_qualification),
            birthdate: Set(input.birthdate),
            manager_id: Set(input.manager_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        employee.insert(&self.db).await
    }

    /// Updates an employee record. Unset input fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee does not exist or the update fails.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateEmployeeInput,
    ) -> Result<Option<employees::Model>, DbErr> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: employees::ActiveModel = existing.into();

        if let Some(v) = input.first_name {
            active.first_name = Set(v);
        }
        if let Some(v) = input.last_name {
            active.last_name = Set(v);
        }
        if let Some(v) = input.work_email {
            active.work_email = Set(v);
        }
        if let Some(v) = input.personal_email {
            active.personal_email = Set(Some(v));
        }
        if let Some(v) = input.phone {
            active.phone = Set(Some(v));
        }
        if let Some(v) = input.department {
            active.department = Set(Some(v));
        }
        if let Some(v) = input.designation {
            active.designation = Set(Some(v));
        }
        if let Some(v) = input.location {
            active.location = Set(Some(v));
        }
        if let Some(v) = input.status {
            active.status = Set(v.as_str().to_string());
        }
        if let Some(v) = input.hire_date {
            active.hire_date = Set(Some(v));
        }
        if let Some(v) = input.gender {
            active.gender = Set(Some(v));
        }
        if let Some(v) = input.address {
            active.address = Set(Some(v));
        }
        if let Some(v) = input.emergency_contact {
            active.emergency_contact = Set(Some(v));
        }
        if let Some(v) = input.education_qualification {
            active.education_qualification = Set(Some(v));
        }
        if let Some(v) = input.birthdate {
            active.birthdate = Set(Some(v));
        }
        if let Some(v) = input.manager_id {
            active.manager_id = Set(v);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(Some(updated))
    }

    /// Deletes an employee and their owned sub-records.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = employees::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    /// Creates or replaces an employee's bank details.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub async fn upsert_bank_details(
        &self,
        employee_id: Uuid,
        input: UpsertBankDetailsInput,
    ) -> Result<bank_details::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let existing = bank_details::Entity::find()
            .filter(bank_details::Column::EmployeeId.eq(employee_id))
            .one(&self.db)
            .await?;

        match existing {
            Some(model) => {
                let mut active: bank_details::ActiveModel = model.into();
                active.bank_name = Set(input.bank_name);
                active.account_number = Set(input.account_number);
                active.ifsc_code = Set(input.ifsc_code);
                active.branch = Set(input.branch);
                active.pf_number = Set(input.pf_number);
                active.uan = Set(input.uan);
                active.updated_at = Set(now);
                active.update(&self.db).await
            }
            None => {
                bank_details::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    employee_id: Set(employee_id),
                    bank_name: Set(input.bank_name),
                    account_number: Set(input.account_number),
                    ifsc_code: Set(input.ifsc_code),
                    branch: Set(input.branch),
                    pf_number: Set(input.pf_number),
                    uan: Set(input.uan),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(&self.db)
                .await
            }
        }
    }

    /// Records a stored document for an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    #[allow(clippy::too_many_arguments)]
    pub async fn add_document(
        &self,
        id: Uuid,
        employee_id: Uuid,
        insurance_id: Option<Uuid>,
        title: &str,
        storage_key: &str,
        content_type: &str,
        file_size: i64,
        doc_type: &str,
    ) -> Result<documents::Model, DbErr> {
        documents::ActiveModel {
            id: Set(id),
            employee_id: Set(employee_id),
            insurance_id: Set(insurance_id),
            title: Set(title.to_string()),
            storage_key: Set(storage_key.to_string()),
            content_type: Set(content_type.to_string()),
            file_size: Set(file_size),
            doc_type: Set(doc_type.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&self.db)
        .await
    }

    /// Lists documents recorded for an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_documents(&self, employee_id: Uuid) -> Result<Vec<documents::Model>, DbErr> {
        documents::Entity::find()
            .filter(documents::Column::EmployeeId.eq(employee_id))
            .order_by_desc(documents::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Finds a document record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_document(&self, id: Uuid) -> Result<Option<documents::Model>, DbErr> {
        documents::Entity::find_by_id(id).one(&self.db).await
    }

    /// Deletes a document record, returning it for storage cleanup.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete_document(&self, id: Uuid) -> Result<Option<documents::Model>, DbErr> {
        let Some(doc) = self.find_document(id).await? else {
            return Ok(None);
        };

        documents::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(Some(doc))
    }
}
