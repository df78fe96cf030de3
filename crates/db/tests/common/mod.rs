//! Shared fixtures for repository integration tests.
//!
//! Each test gets its own in-memory SQLite database with all migrations
//! applied. The pool is pinned to one connection so the database lives as
//! long as the pool.

#![allow(dead_code)]

use finboard_db::migration::{Migrator, MigratorTrait};
use finboard_db::repositories::{NewCompany, NewUser, RegisteredCompany};
use finboard_db::RegistrationRepository;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Opens a fresh migrated database.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

/// User input with a dummy hash.
pub fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        password_hash: "$argon2id$test".to_string(),
    }
}

/// Company input.
pub fn new_company(name: &str) -> NewCompany {
    NewCompany {
        name: name.to_string(),
        tax_id: Some("PL1234567890".to_string()),
        base_currency: "PLN".to_string(),
    }
}

/// Registers a company with a manager called `manager`.
pub async fn register(db: &DatabaseConnection, company: &str, manager: &str) -> RegisteredCompany {
    RegistrationRepository::new(db.clone())
        .register_company(new_company(company), new_user(manager))
        .await
        .expect("Failed to register company")
}
