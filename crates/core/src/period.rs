//! Calendar reporting periods relative to a given day.
//!
//! The dashboards report on the current year, the current month and the
//! previous month. All helpers return closed [`DateRange`]s.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::aggregation::DateRange;

fn first_of_month(day: NaiveDate) -> NaiveDate {
    day - Days::new(u64::from(day.day0()))
}

fn first_of_year(day: NaiveDate) -> NaiveDate {
    day - Days::new(u64::from(day.ordinal0()))
}

/// Day before `start + months`, saturating at the end of the calendar.
fn last_day_after(start: NaiveDate, months: u32) -> NaiveDate {
    start
        .checked_add_months(Months::new(months))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// January 1st through December 31st of `today`'s year.
#[must_use]
pub fn year(today: NaiveDate) -> DateRange {
    let start = first_of_year(today);
    DateRange::from_ordered(start, last_day_after(start, 12))
}

/// First through last day of `today`'s month.
#[must_use]
pub fn month(today: NaiveDate) -> DateRange {
    let start = first_of_month(today);
    DateRange::from_ordered(start, last_day_after(start, 1))
}

/// The calendar month before `today`'s month. January maps to December of
/// the previous year.
#[must_use]
pub fn previous_month(today: NaiveDate) -> DateRange {
    let last_of_previous = first_of_month(today)
        .pred_opt()
        .unwrap_or(NaiveDate::MIN);
    month(last_of_previous)
}
