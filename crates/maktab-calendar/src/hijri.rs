//! Umm al-Qura date parts for a Gregorian calendar date.

use chrono::{Datelike, NaiveDate};
use icu::calendar::Date;
use icu::calendar::cal::HijriUmmAlQura;

/// Hijri month names in calendar order (Arabic script, Umm al-Qura numbering).
///
/// Day and year numbers render with ASCII digits; only the month name is
/// localized.
pub const MONTH_NAMES: [&str; 12] = [
    "محرم",
    "صفر",
    "ربيع الأول",
    "ربيع الآخر",
    "جمادى الأولى",
    "جمادى الآخرة",
    "رجب",
    "شعبان",
    "رمضان",
    "شوال",
    "ذو القعدة",
    "ذو الحجة",
];

/// Lunar-calendar parts of one Gregorian date, pre-rendered as strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LunarParts {
    /// Day of the lunar month, ASCII digits.
    pub day: String,
    /// Localized lunar month name.
    pub month: String,
    /// Lunar year (AH), ASCII digits.
    pub year: String,
}

impl LunarParts {
    pub(crate) fn blank() -> Self {
        Self {
            day: String::new(),
            month: String::new(),
            year: String::new(),
        }
    }

    /// True if the mapping failed and every part is empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.day.is_empty() && self.month.is_empty() && self.year.is_empty()
    }
}

/// ## Summary
/// Maps a Gregorian date to its Umm al-Qura day, month name, and year.
///
/// Deterministic pure function of the input date. On any internal failure
/// (date outside the calendar's range, unexpected month ordinal) it returns
/// blank parts rather than erroring, so date rendering degrades gracefully
/// instead of blocking the view.
#[must_use]
pub fn lunar_parts(date: NaiveDate) -> LunarParts {
    if let Some(parts) = convert(date) {
        parts
    } else {
        tracing::debug!(%date, "Hijri conversion failed, returning blank parts");
        LunarParts::blank()
    }
}

/// Lunar day number of a Gregorian date, for per-cell calendar headers.
///
/// Empty string when the mapping fails.
#[must_use]
pub fn lunar_day(date: NaiveDate) -> String {
    lunar_parts(date).day
}

fn convert(date: NaiveDate) -> Option<LunarParts> {
    let month = u8::try_from(date.month()).ok()?;
    let day = u8::try_from(date.day()).ok()?;
    let iso = Date::try_new_iso(date.year(), month, day).ok()?;
    let hijri = iso.to_calendar(HijriUmmAlQura::new());

    let ordinal = usize::from(hijri.month().ordinal);
    let month_name = MONTH_NAMES.get(ordinal.checked_sub(1)?)?;

    Some(LunarParts {
        day: hijri.day_of_month().0.to_string(),
        month: (*month_name).to_string(),
        year: hijri.year().era_year_or_related_iso().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test_log::test]
    fn test_lunar_parts_known_date() {
        // 15 January 2025 falls in Rajab 1446 AH (Umm al-Qura).
        let parts = lunar_parts(date(2025, 1, 15));
        assert_eq!(parts.month, MONTH_NAMES[6]);
        assert_eq!(parts.year, "1446");
        assert!(!parts.day.is_empty());
    }

    #[test_log::test]
    fn test_lunar_parts_is_deterministic() {
        let a = lunar_parts(date(2025, 6, 1));
        let b = lunar_parts(date(2025, 6, 1));
        assert_eq!(a, b);
        assert!(!a.is_blank());
    }

    #[test_log::test]
    fn test_lunar_parts_uses_ascii_digits() {
        let parts = lunar_parts(date(2025, 3, 10));
        assert!(parts.day.bytes().all(|b| b.is_ascii_digit()));
        assert!(parts.year.bytes().all(|b| b.is_ascii_digit()));
    }

    #[test_log::test]
    fn test_lunar_parts_day_in_month_range() {
        let parts = lunar_parts(date(2024, 2, 29));
        let day: u32 = parts.day.parse().expect("numeric day");
        assert!((1..=30).contains(&day));
    }

    #[test_log::test]
    fn test_lunar_day_matches_parts() {
        let d = date(2025, 9, 4);
        assert_eq!(lunar_day(d), lunar_parts(d).day);
    }
}
