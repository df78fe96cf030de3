//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod company;
pub mod finance;
pub mod group;
pub mod registration;
pub mod session;
pub mod user;

pub use company::CompanyRepository;
pub use finance::{FinanceRepository, NewExpense, NewRevenue};
pub use group::GroupRepository;
pub use registration::{
    NewCompany, NewUser, RegisteredCompany, RegistrationError, RegistrationRepository,
};
pub use session::{NewSession, SessionRepository};
pub use user::UserRepository;

/// Fresh in-memory database with all migrations applied.
#[cfg(test)]
pub(crate) async fn test_db() -> sea_orm::DatabaseConnection {
    use sea_orm_migration::MigratorTrait;

    let mut options = sea_orm::ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = sea_orm::Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    crate::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}
