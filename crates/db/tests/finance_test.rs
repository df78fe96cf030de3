//! Integration tests for the finance repository.

mod common;

use chrono::NaiveDate;
use common::{register, setup_db};
use finboard_core::aggregation::DateRange;
use finboard_db::FinanceRepository;
use finboard_db::repositories::{NewExpense, NewRevenue};
use finboard_shared::types::PageRequest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn revenue(
    number: &str,
    document_date: NaiveDate,
    expected: Option<NaiveDate>,
    settled: bool,
    net: Decimal,
    converted: Decimal,
) -> NewRevenue {
    NewRevenue {
        document_number: number.to_string(),
        customer: Some("Initech".to_string()),
        document_date,
        expected_payment_date: expected,
        currency: "EUR".to_string(),
        net_amount: net,
        net_amount_converted: converted,
        settlement_status: settled,
    }
}

fn expense(
    number: &str,
    document_date: NaiveDate,
    expected: Option<NaiveDate>,
    settled: bool,
    net: Decimal,
) -> NewExpense {
    NewExpense {
        document_number: number.to_string(),
        vendor: Some("Hooli".to_string()),
        category: Some("Office".to_string()),
        document_date,
        expected_payment_date: expected,
        net_amount: net,
        settlement_status: settled,
    }
}

/// Two companies with records spread around June 2026.
async fn seed(repo: &FinanceRepository, acme: Uuid, globex: Uuid) {
    let revenues = [
        // June, settled and paid in June
        revenue("R-1", date(2026, 6, 1), Some(date(2026, 6, 30)), true, dec!(100.25), dec!(400.50)),
        // May, unsettled
        revenue("R-2", date(2026, 5, 31), Some(date(2026, 6, 10)), false, dec!(50), dec!(200.25)),
        // January, settled without a payment date
        revenue("R-3", date(2026, 1, 1), None, true, dec!(10), dec!(40)),
        // Previous year, paid this year
        revenue(
            "R-4",
            date(2025, 12, 31),
            Some(date(2026, 1, 15)),
            true,
            dec!(1000.75),
            dec!(4000),
        ),
    ];
    for input in revenues {
        repo.create_revenue(acme, input).await.expect("insert revenue");
    }

    repo.create_revenue(
        globex,
        revenue("G-1", date(2026, 6, 2), Some(date(2026, 6, 3)), true, dec!(7777), dec!(7777)),
    )
    .await
    .expect("insert revenue");

    let expenses = [
        expense("E-1", date(2026, 6, 15), Some(date(2026, 7, 1)), true, dec!(250.50)),
        expense("E-2", date(2026, 12, 31), Some(date(2027, 1, 31)), true, dec!(99.50)),
        expense("E-3", date(2026, 3, 1), None, false, dec!(20)),
    ];
    for input in expenses {
        repo.create_expense(acme, input).await.expect("insert expense");
    }

    repo.create_expense(
        globex,
        expense("GE-1", date(2026, 6, 2), Some(date(2026, 6, 3)), true, dec!(5555)),
    )
    .await
    .expect("insert expense");
}

#[tokio::test]
async fn test_totals_follow_filter_then_sum_rules() {
    let db = setup_db().await;
    let acme = register(&db, "Acme", "alice").await.company.id;
    let globex = register(&db, "Globex", "bob").await.company.id;
    let repo = FinanceRepository::new(db.clone());
    seed(&repo, acme, globex).await;

    let year = DateRange::new(date(2026, 1, 1), date(2026, 12, 31)).expect("valid range");

    assert_eq!(
        repo.revenue_total(acme, &year).await.expect("query"),
        dec!(640.75)
    );
    assert_eq!(
        repo.expense_total(acme, &year).await.expect("query"),
        dec!(370.00)
    );
    assert_eq!(
        repo.receipt_total(acme, &year).await.expect("query"),
        dec!(1101.00)
    );
    assert_eq!(
        repo.expenditure_total(acme, &year).await.expect("query"),
        dec!(250.50)
    );
}

#[tokio::test]
async fn test_totals_include_both_bounds() {
    let db = setup_db().await;
    let acme = register(&db, "Acme", "alice").await.company.id;
    let globex = register(&db, "Globex", "bob").await.company.id;
    let repo = FinanceRepository::new(db.clone());
    seed(&repo, acme, globex).await;

    let may_31_to_june_1 =
        DateRange::new(date(2026, 5, 31), date(2026, 6, 1)).expect("valid range");
    assert_eq!(
        repo.revenue_total(acme, &may_31_to_june_1)
            .await
            .expect("query"),
        dec!(600.75)
    );
}

#[tokio::test]
async fn test_totals_for_company_without_records_are_zero() {
    let db = setup_db().await;
    let acme = register(&db, "Acme", "alice").await.company.id;
    let repo = FinanceRepository::new(db.clone());

    let dashboard = repo
        .manager_dashboard(acme, date(2026, 6, 15))
        .await
        .expect("query");

    assert_eq!(dashboard.annual_revenue, Decimal::ZERO);
    assert_eq!(dashboard.annual_cash_change, Decimal::ZERO);
}

#[tokio::test]
async fn test_main_dashboard_periods() {
    let db = setup_db().await;
    let acme = register(&db, "Acme", "alice").await.company.id;
    let globex = register(&db, "Globex", "bob").await.company.id;
    let repo = FinanceRepository::new(db.clone());
    seed(&repo, acme, globex).await;

    let dashboard = repo
        .main_dashboard(acme, date(2026, 6, 15))
        .await
        .expect("query");

    assert_eq!(dashboard.current_month_revenue, dec!(400.50));
    assert_eq!(dashboard.last_month_revenue, dec!(200.25));
    assert_eq!(dashboard.annual_revenue, dec!(640.75));
}

#[tokio::test]
async fn test_manager_dashboard_and_statements() {
    let db = setup_db().await;
    let acme = register(&db, "Acme", "alice").await.company.id;
    let globex = register(&db, "Globex", "bob").await.company.id;
    let repo = FinanceRepository::new(db.clone());
    seed(&repo, acme, globex).await;

    let today = date(2026, 6, 15);

    let dashboard = repo.manager_dashboard(acme, today).await.expect("query");
    assert_eq!(dashboard.annual_net, dec!(270.75));
    assert_eq!(dashboard.annual_cash_change, dec!(850.50));

    let income = repo.income_statement(acme, today).await.expect("query");
    assert_eq!(income.period_start, date(2026, 1, 1));
    assert_eq!(income.period_end, date(2026, 12, 31));
    assert_eq!(income.total_net_revenues, dec!(640.75));
    assert_eq!(income.total_expenses, dec!(370));
    assert_eq!(income.net_income, dec!(270.75));

    let cash = repo.cash_flow(acme, today).await.expect("query");
    assert_eq!(cash.receipts, dec!(1101));
    assert_eq!(cash.expenditures, dec!(250.50));
    assert_eq!(cash.cash_change, dec!(850.50));

    let other = repo.cash_flow(globex, today).await.expect("query");
    assert_eq!(other.cash_change, dec!(2222));
}

#[tokio::test]
async fn test_list_revenues_is_scoped_and_paginated() {
    let db = setup_db().await;
    let acme = register(&db, "Acme", "alice").await.company.id;
    let globex = register(&db, "Globex", "bob").await.company.id;
    let repo = FinanceRepository::new(db.clone());
    seed(&repo, acme, globex).await;

    let first = PageRequest { page: 1, per_page: 3 };
    let (rows, total) = repo.list_revenues(acme, &first).await.expect("query");
    assert_eq!(total, 4);
    let numbers: Vec<_> = rows.iter().map(|r| r.document_number.as_str()).collect();
    assert_eq!(numbers, vec!["R-4", "R-3", "R-2"]);

    let second = PageRequest { page: 2, per_page: 3 };
    let (rows, _) = repo.list_revenues(acme, &second).await.expect("query");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].document_number, "R-1");
}

#[tokio::test]
async fn test_list_expenses_excludes_other_companies() {
    let db = setup_db().await;
    let acme = register(&db, "Acme", "alice").await.company.id;
    let globex = register(&db, "Globex", "bob").await.company.id;
    let repo = FinanceRepository::new(db.clone());
    seed(&repo, acme, globex).await;

    let (rows, total) = repo
        .list_expenses(globex, &PageRequest::default())
        .await
        .expect("query");
    assert_eq!(total, 1);
    assert_eq!(rows[0].document_number, "GE-1");
    assert!(rows.iter().all(|e| e.company_id == globex));
}

#[tokio::test]
async fn test_record_amounts_keep_four_decimal_places() {
    let db = setup_db().await;
    let acme = register(&db, "Acme", "alice").await.company.id;
    let repo = FinanceRepository::new(db.clone());

    let created = repo
        .create_revenue(
            acme,
            revenue("R-9", date(2026, 6, 1), None, true, dec!(1234.5625), dec!(4938.25)),
        )
        .await
        .expect("insert revenue");
    repo.create_expense(acme, expense("E-9", date(2026, 6, 1), None, true, dec!(0.0625)))
        .await
        .expect("insert expense");

    let (rows, _) = repo
        .list_revenues(acme, &PageRequest::default())
        .await
        .expect("query");
    assert_eq!(rows[0].id, created.id);
    assert_eq!(rows[0].net_amount, dec!(1234.5625));
    assert_eq!(rows[0].net_amount_converted, dec!(4938.25));

    let (rows, _) = repo
        .list_expenses(acme, &PageRequest::default())
        .await
        .expect("query");
    assert_eq!(rows[0].net_amount, dec!(0.0625));
}
