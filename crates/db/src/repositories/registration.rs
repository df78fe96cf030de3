//! Registration repository: company and employee onboarding.
//!
//! Company registration writes the company, its first manager, the
//! membership, the per-company permission group and the role group
//! assignment in one transaction.

use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set, SqlErr, TransactionTrait,
};
use thiserror::Error;
use uuid::Uuid;

use finboard_core::access::{VIEW_COMPANY, company_group_name};
use finboard_shared::types::{CompanyId, RoleGroup};

use super::group::{add_user_to_group, ensure_group, grant_company_permission};
use super::user::username_taken;
use crate::entities::{companies, company_members, users};

/// Registration errors.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Another user already has this username.
    #[error("A user with that username already exists.")]
    UsernameTaken,

    /// The target company does not exist.
    #[error("Company not found")]
    CompanyNotFound,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Company fields collected by the registration form.
#[derive(Debug, Clone)]
pub struct NewCompany {
    /// Company name.
    pub name: String,
    /// Tax identification number.
    pub tax_id: Option<String>,
    /// ISO 4217 code of the reporting currency.
    pub base_currency: String,
}

/// User fields collected by the registration forms.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Argon2 PHC string.
    pub password_hash: String,
}

/// Rows created by a company registration.
#[derive(Debug, Clone)]
pub struct RegisteredCompany {
    /// The new company.
    pub company: companies::Model,
    /// Its first manager.
    pub manager: users::Model,
}

/// Registration repository.
#[derive(Debug, Clone)]
pub struct RegistrationRepository {
    db: DatabaseConnection,
}

impl RegistrationRepository {
    /// Creates a new registration repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a company with its first manager.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationError::UsernameTaken` if the manager's username
    /// is in use, or a database error. Nothing is written on failure.
    pub async fn register_company(
        &self,
        company: NewCompany,
        manager: NewUser,
    ) -> Result<RegisteredCompany, RegistrationError> {
        let txn = self.db.begin().await?;

        if username_taken(&txn, &manager.username).await? {
            txn.rollback().await?;
            return Err(RegistrationError::UsernameTaken);
        }

        let now = chrono::Utc::now().into();
        let company_id = Uuid::new_v4();

        let company = companies::ActiveModel {
            id: Set(company_id),
            name: Set(company.name),
            tax_id: Set(company.tax_id),
            base_currency: Set(company.base_currency),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let user = insert_user(&txn, manager, now).await?;

        company_members::ActiveModel {
            user_id: Set(user.id),
            company_id: Set(company_id),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        // Per-company group carrying the object permission on the company row
        let company_group =
            ensure_group(&txn, &company_group_name(CompanyId::from_uuid(company_id))).await?;
        grant_company_permission(&txn, company_group.id, company_id, VIEW_COMPANY).await?;

        let managers = ensure_group(&txn, RoleGroup::Managers.name()).await?;
        add_user_to_group(&txn, user.id, managers.id).await?;

        txn.commit().await?;

        tracing::info!(company_id = %company.id, user_id = %user.id, "company registered");

        Ok(RegisteredCompany {
            company,
            manager: user,
        })
    }

    /// Registers an employee of an existing company in `role`.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationError::UsernameTaken`,
    /// `RegistrationError::CompanyNotFound`, or a database error.
    pub async fn register_employee(
        &self,
        company_id: Uuid,
        employee: NewUser,
        role: RoleGroup,
    ) -> Result<users::Model, RegistrationError> {
        let txn = self.db.begin().await?;

        if companies::Entity::find_by_id(company_id).one(&txn).await?.is_none() {
            txn.rollback().await?;
            return Err(RegistrationError::CompanyNotFound);
        }

        if username_taken(&txn, &employee.username).await? {
            txn.rollback().await?;
            return Err(RegistrationError::UsernameTaken);
        }

        let now = chrono::Utc::now().into();
        let user = insert_user(&txn, employee, now).await?;

        company_members::ActiveModel {
            user_id: Set(user.id),
            company_id: Set(company_id),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let group = ensure_group(&txn, role.name()).await?;
        add_user_to_group(&txn, user.id, group.id).await?;

        txn.commit().await?;

        tracing::info!(%company_id, user_id = %user.id, group = %role, "employee registered");

        Ok(user)
    }
}

async fn insert_user<C: sea_orm::ConnectionTrait>(
    conn: &C,
    user: NewUser,
    now: sea_orm::prelude::DateTimeWithTimeZone,
) -> Result<users::Model, RegistrationError> {
    users::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(user.username),
        email: Set(user.email),
        password_hash: Set(user.password_hash),
        first_name: Set(user.first_name),
        last_name: Set(user.last_name),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
    .map_err(|e| match e.sql_err() {
        // Username claimed after the pre-check
        Some(SqlErr::UniqueConstraintViolation(_)) => RegistrationError::UsernameTaken,
        _ => RegistrationError::Database(e),
    })
}
