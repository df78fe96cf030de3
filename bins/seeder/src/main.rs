//! Database seeder for Finboard development and testing.
//!
//! Seeds a demo company with a manager, an employee and a year of revenue and
//! expense documents so every dashboard has figures to show.
//!
//! Usage: cargo run --bin seeder
//!
//! Log in as `demo-manager` or `demo-employee` with password `demo-password`.

use anyhow::Context;
use chrono::{Datelike, Days, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use finboard_core::auth::hash_password;
use finboard_db::repositories::{NewCompany, NewExpense, NewRevenue, NewUser};
use finboard_db::{FinanceRepository, RegistrationRepository, UserRepository};
use finboard_shared::config::DatabaseConfig;
use finboard_shared::types::RoleGroup;

const MANAGER: &str = "demo-manager";
const EMPLOYEE: &str = "demo-employee";
const PASSWORD: &str = "demo-password";

/// Expense categories cycled through the seeded months.
const CATEGORIES: [&str; 4] = ["Rent", "Payroll", "Software", "Travel"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    println!("Connecting to database...");
    let db = finboard_db::connect_with(&DatabaseConfig::from_url(database_url))
        .await
        .context("Failed to connect to database")?;

    if UserRepository::new(db.clone())
        .username_exists(MANAGER)
        .await?
    {
        println!("Demo company already exists, skipping...");
        return Ok(());
    }

    println!("Seeding demo company...");
    let company_id = seed_company(&db).await?;

    println!("Seeding revenues and expenses...");
    let (revenues, expenses) = seed_records(&db, company_id, Utc::now().date_naive()).await?;
    println!("  Created {revenues} revenues and {expenses} expenses");

    println!("Seeding complete!");
    Ok(())
}

fn demo_user(username: &str, first_name: &str, last_name: &str) -> anyhow::Result<NewUser> {
    Ok(NewUser {
        username: username.to_string(),
        email: format!("{username}@finboard.dev"),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        password_hash: hash_password(PASSWORD)?,
    })
}

fn category(index: u32) -> &'static str {
    CATEGORIES[index as usize % CATEGORIES.len()]
}

/// Registers the demo company, its manager and one employee.
async fn seed_company(db: &DatabaseConnection) -> anyhow::Result<Uuid> {
    let repo = RegistrationRepository::new(db.clone());

    let registered = repo
        .register_company(
            NewCompany {
                name: "Demo Trading Sp. z o.o.".to_string(),
                tax_id: Some("PL5260250274".to_string()),
                base_currency: "PLN".to_string(),
            },
            demo_user(MANAGER, "Maria", "Manager")?,
        )
        .await?;
    println!("  Created company {} with manager {MANAGER}", registered.company.id);

    repo.register_employee(
        registered.company.id,
        demo_user(EMPLOYEE, "Edward", "Employee")?,
        RoleGroup::Employees,
    )
    .await?;
    println!("  Created employee {EMPLOYEE}");

    Ok(registered.company.id)
}

/// Seeds two revenues and two expenses for each of the last twelve months.
///
/// Documents older than a month are settled; newer ones are still open.
async fn seed_records(
    db: &DatabaseConnection,
    company_id: Uuid,
    today: NaiveDate,
) -> anyhow::Result<(usize, usize)> {
    let repo = FinanceRepository::new(db.clone());
    let mut revenues = 0;
    let mut expenses = 0;

    for months_ago in 0..12_u32 {
        let Some(month_start) = today
            .with_day(1)
            .and_then(|d| d.checked_sub_months(Months::new(months_ago)))
        else {
            continue;
        };
        let settled = months_ago > 0;
        let base = Decimal::from(1_000 + months_ago * 125);

        for (n, day) in [(1_u32, 3_u64), (2, 17)] {
            let document_date = month_start + Days::new(day - 1);
            if document_date > today {
                continue;
            }
            let due = document_date + Days::new(14);

            repo.create_revenue(
                company_id,
                NewRevenue {
                    document_number: format!(
                        "FV/{n}/{:02}/{}",
                        document_date.month(),
                        document_date.year()
                    ),
                    customer: Some(format!("Customer {n}")),
                    document_date,
                    expected_payment_date: Some(due),
                    currency: if n == 1 { "PLN" } else { "EUR" }.to_string(),
                    net_amount: base,
                    net_amount_converted: if n == 1 { base } else { base * Decimal::from(4) },
                    settlement_status: settled,
                },
            )
            .await?;
            revenues += 1;

            repo.create_expense(
                company_id,
                NewExpense {
                    document_number: format!(
                        "R/{n}/{:02}/{}",
                        document_date.month(),
                        document_date.year()
                    ),
                    vendor: Some(format!("Vendor {n}")),
                    category: Some(category(months_ago + n).to_string()),
                    document_date,
                    expected_payment_date: Some(due),
                    net_amount: base / Decimal::from(2),
                    settlement_status: settled,
                },
            )
            .await?;
            expenses += 1;
        }
    }

    Ok((revenues, expenses))
}
