//! Calendar-view formatting boundary.
//!
//! The toolbar and grid renderers consume these helpers instead of
//! recomputing lunar dates themselves; all lunar math stays in
//! `maktab-calendar`.

use chrono::{Datelike, NaiveDate};

use maktab_calendar::{dual_month_label, lunar_day};

/// ## Summary
/// Toolbar label for a month view: the Gregorian label the UI already
/// renders, followed by the lunar month span of `[month_start, month_end]`.
///
/// Falls back to the Gregorian label alone when the lunar mapping fails.
#[must_use]
pub fn toolbar_label(
    gregorian_label: &str,
    month_start: NaiveDate,
    month_end: NaiveDate,
) -> String {
    let lunar = dual_month_label(month_start, month_end);
    if lunar.is_empty() {
        gregorian_label.to_string()
    } else {
        format!("{gregorian_label} ({lunar})")
    }
}

/// Per-cell header: Gregorian day number with the lunar day alongside, or
/// the Gregorian day alone when the mapping fails.
#[must_use]
pub fn cell_header(date: NaiveDate) -> String {
    let lunar = lunar_day(date);
    if lunar.is_empty() {
        date.day().to_string()
    } else {
        format!("{} / {lunar}", date.day())
    }
}
