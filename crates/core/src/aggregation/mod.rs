//! Revenue, expense and cash-movement aggregation.
//!
//! Four calculators, each a filter-then-sum over company-scoped records:
//! - `revenue_total`: revenues by document date, summing the converted amount
//! - `expense_total`: expenses by document date
//! - `receipt_total`: settled revenues by expected payment date
//! - `expenditure_total`: settled expenses by expected payment date

mod calculator;
mod error;
mod types;


pub use calculator::{expenditure_total, expense_total, receipt_total, revenue_total};
pub use error::AggregationError;
pub use types::{DateRange, ExpenseRecord, RevenueRecord};
