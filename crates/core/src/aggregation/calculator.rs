//! The four calculators.

use rust_decimal::Decimal;

use super::types::{DateRange, ExpenseRecord, RevenueRecord};
use finboard_shared::types::CompanyId;

fn settled_within(
    settlement_status: bool,
    expected_payment_date: Option<chrono::NaiveDate>,
    range: &DateRange,
) -> bool {
    settlement_status && expected_payment_date.is_some_and(|date| range.contains(date))
}

/// Sums `net_amount_converted` of the company's revenues whose document date
/// falls in `range`.
pub fn revenue_total<'a, I>(company: CompanyId, range: &DateRange, records: I) -> Decimal
where
    I: IntoIterator<Item = &'a RevenueRecord>,
{
    records
        .into_iter()
        .filter(|r| r.company_id == company && range.contains(r.document_date))
        .map(|r| r.net_amount_converted)
        .sum()
}

/// Sums `net_amount` of the company's expenses whose document date falls in
/// `range`.
pub fn expense_total<'a, I>(company: CompanyId, range: &DateRange, records: I) -> Decimal
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    records
        .into_iter()
        .filter(|e| e.company_id == company && range.contains(e.document_date))
        .map(|e| e.net_amount)
        .sum()
}

/// Sums `net_amount` of the company's settled revenues whose expected payment
/// date falls in `range`.
///
/// Revenues without an expected payment date never count.
pub fn receipt_total<'a, I>(company: CompanyId, range: &DateRange, records: I) -> Decimal
where
    I: IntoIterator<Item = &'a RevenueRecord>,
{
    records
        .into_iter()
        .filter(|r| {
            r.company_id == company
                && settled_within(r.settlement_status, r.expected_payment_date, range)
        })
        .map(|r| r.net_amount)
        .sum()
}

/// Sums `net_amount` of the company's settled expenses whose expected payment
/// date falls in `range`.
pub fn expenditure_total<'a, I>(company: CompanyId, range: &DateRange, records: I) -> Decimal
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    records
        .into_iter()
        .filter(|e| {
            e.company_id == company
                && settled_within(e.settlement_status, e.expected_payment_date, range)
        })
        .map(|e| e.net_amount)
        .sum()
}
