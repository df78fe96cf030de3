//! Record and range types the calculators work on.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::AggregationError;
use finboard_shared::types::CompanyId;

/// Closed date interval; both bounds are included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting `start > end`.
    ///
    /// # Errors
    ///
    /// Returns `AggregationError::InvalidRange` if the bounds are inverted.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AggregationError> {
        if start > end {
            return Err(AggregationError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a range from bounds the caller already knows are ordered.
    pub(crate) const fn from_ordered(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// First day of the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns true if `date` falls within the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// The fields of a revenue document the calculators read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevenueRecord {
    /// Owning company.
    pub company_id: CompanyId,
    /// Document (issue) date.
    pub document_date: NaiveDate,
    /// Date the customer is expected to pay.
    pub expected_payment_date: Option<NaiveDate>,
    /// Whether the payment has cleared.
    pub settlement_status: bool,
    /// Net amount in the document currency.
    pub net_amount: Decimal,
    /// Net amount in the company base currency.
    pub net_amount_converted: Decimal,
}

/// The fields of an expense document the calculators read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseRecord {
    /// Owning company.
    pub company_id: CompanyId,
    /// Document (issue) date.
    pub document_date: NaiveDate,
    /// Date the payment to the vendor is expected.
    pub expected_payment_date: Option<NaiveDate>,
    /// Whether the payment has cleared.
    pub settlement_status: bool,
    /// Net amount.
    pub net_amount: Decimal,
}
