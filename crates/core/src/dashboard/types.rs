//! Dashboard data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregation::DateRange;

/// Revenue figures shown on the main company dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainDashboard {
    /// Revenue dated in the current calendar month.
    pub current_month_revenue: Decimal,
    /// Revenue dated in the previous calendar month.
    pub last_month_revenue: Decimal,
    /// Revenue dated in the current calendar year.
    pub annual_revenue: Decimal,
}

/// Yearly totals shown on the manager dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerDashboard {
    /// Revenue for the year.
    pub annual_revenue: Decimal,
    /// Expenses for the year.
    pub annual_expenses: Decimal,
    /// Revenue minus expenses.
    pub annual_net: Decimal,
    /// Settled revenue paid during the year.
    pub annual_receipts: Decimal,
    /// Settled expenses paid during the year.
    pub annual_expenditures: Decimal,
    /// Receipts minus expenditures.
    pub annual_cash_change: Decimal,
}

impl ManagerDashboard {
    /// Builds the dashboard from the four yearly totals.
    #[must_use]
    pub fn new(
        revenue: Decimal,
        expenses: Decimal,
        receipts: Decimal,
        expenditures: Decimal,
    ) -> Self {
        Self {
            annual_revenue: revenue,
            annual_expenses: expenses,
            annual_net: revenue - expenses,
            annual_receipts: receipts,
            annual_expenditures: expenditures,
            annual_cash_change: receipts - expenditures,
        }
    }
}

/// Accrual view of a period: what was invoiced against what was spent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatement {
    /// First day of the reporting period.
    pub period_start: NaiveDate,
    /// Last day of the reporting period.
    pub period_end: NaiveDate,
    /// Revenue in the company base currency.
    pub total_net_revenues: Decimal,
    /// Expenses.
    pub total_expenses: Decimal,
    /// Revenues minus expenses.
    pub net_income: Decimal,
}

impl IncomeStatement {
    /// Builds the statement for `period`, deriving net income.
    #[must_use]
    pub fn new(period: &DateRange, revenues: Decimal, expenses: Decimal) -> Self {
        Self {
            period_start: period.start(),
            period_end: period.end(),
            total_net_revenues: revenues,
            total_expenses: expenses,
            net_income: revenues - expenses,
        }
    }
}

/// Cash view of a period: settled money in against settled money out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowStatement {
    /// First day of the reporting period.
    pub period_start: NaiveDate,
    /// Last day of the reporting period.
    pub period_end: NaiveDate,
    /// Settled revenue paid in the period.
    pub receipts: Decimal,
    /// Settled expenses paid in the period.
    pub expenditures: Decimal,
    /// Receipts minus expenditures.
    pub cash_change: Decimal,
}

impl CashFlowStatement {
    /// Builds the statement for `period`, deriving the cash change.
    #[must_use]
    pub fn new(period: &DateRange, receipts: Decimal, expenditures: Decimal) -> Self {
        Self {
            period_start: period.start(),
            period_end: period.end(),
            receipts,
            expenditures,
            cash_change: receipts - expenditures,
        }
    }
}
