use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::model::holiday::Holiday;

/// Dates of the holidays that are currently switched on.
pub fn active_holidays(holidays: &[Holiday]) -> BTreeSet<NaiveDate> {
    holidays
        .iter()
        .filter(|h| h.is_active)
        .map(|h| h.date)
        .collect()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Days in `[from, to]` that are neither weekend nor active holiday.
/// An inverted range counts zero; rejecting it is the caller's job.
pub fn business_day_count(from: NaiveDate, to: NaiveDate, holidays: &BTreeSet<NaiveDate>) -> u32 {
    if to < from {
        return 0;
    }
    from.iter_days()
        .take_while(|d| *d <= to)
        .filter(|d| !is_weekend(*d) && !holidays.contains(d))
        .count() as u32
}

/// Closed-interval intersection; a shared boundary day overlaps.
pub fn ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && b_start <= a_end
}
