//! Company repository: company rows and memberships.

use sea_orm::{DatabaseConnection, DbErr, EntityTrait};
use uuid::Uuid;

use crate::entities::{companies, company_members};

/// Company repository for lookups and membership resolution.
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    db: DatabaseConnection,
}

impl CompanyRepository {
    /// Creates a new company repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a company by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<companies::Model>, DbErr> {
        companies::Entity::find_by_id(id).one(&self.db).await
    }

    /// Returns the ID of the company the user belongs to, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn company_of(&self, user_id: Uuid) -> Result<Option<Uuid>, DbErr> {
        let member = company_members::Entity::find_by_id(user_id)
            .one(&self.db)
            .await?;

        Ok(member.map(|m| m.company_id))
    }
}
