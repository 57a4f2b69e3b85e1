//! Dual-calendar label composition.
//!
//! A Gregorian month usually straddles two lunar months, so the month label
//! has a three-way shape: one month, two months sharing a year, or two
//! months in different years.

use chrono::NaiveDate;

use crate::hijri::{LunarParts, lunar_parts};

/// ## Summary
/// Composes the lunar label for the Gregorian month spanning
/// `[month_start, month_end]` (its first and last day).
///
/// Also valid for any other date range, e.g. a week view crossing a month
/// boundary. Blank when both boundary mappings fail.
#[must_use]
pub fn dual_month_label(month_start: NaiveDate, month_end: NaiveDate) -> String {
    let start = lunar_parts(month_start);
    let end = lunar_parts(month_end);
    if start.is_blank() && end.is_blank() {
        return String::new();
    }
    compose_month_label(&start, &end)
}

/// ## Summary
/// Composes a month label from the lunar parts at a range's two boundaries.
///
/// - Same month at both ends: `"{month} {year}"`
/// - Months differ, years equal: `"{start_month} / {end_month} {year}"`
/// - Years differ too: `"{start_month} {start_year} / {end_month} {end_year}"`
///
/// The end boundary's year is the one shown whenever the years coincide.
#[must_use]
pub fn compose_month_label(start: &LunarParts, end: &LunarParts) -> String {
    if start.month == end.month {
        format!("{} {}", end.month, end.year)
    } else if start.year == end.year {
        format!("{} / {} {}", start.month, end.month, end.year)
    } else {
        format!(
            "{} {} / {} {}",
            start.month, start.year, end.month, end.year
        )
    }
}

/// Full dual label for a single date: lunar day, month, and year.
///
/// Empty string when the mapping fails, so callers can fall back to the
/// Gregorian-only rendering.
#[must_use]
pub fn dual_day_label(date: NaiveDate) -> String {
    let parts = lunar_parts(date);
    if parts.is_blank() {
        return String::new();
    }
    format!("{} {} {}", parts.day, parts.month, parts.year)
}
