//! View models rendered by the dashboard pages.
//!
//! - [`MainDashboard`]: revenue for the current month, last month and year
//! - [`ManagerDashboard`]: yearly revenue, expenses, receipts and expenditures
//! - [`IncomeStatement`] and [`CashFlowStatement`]: the two manager-only reports

pub mod types;

pub use types::*;
