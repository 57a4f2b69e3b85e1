//! Expansion of a recurrence rule into concrete event instances.
//!
//! Stepping is by calendar unit, never by a fixed duration, so the local
//! wall-clock time of day survives every unit boundary. Termination is
//! guaranteed by the configured instance cap regardless of the end bound.

use chrono::{Days, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use maktab_core::config::SchedulingConfig;
use maktab_core::constants::DEFAULT_SERIES_CAP;
use maktab_core::types::SeriesId;
use maktab_store::model::event::NewEventInstance;

use crate::error::{ServiceError, ServiceResult};
use crate::scheduling::template::EventTemplate;

/// How often a series repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Yearly,
}

impl Frequency {
    /// Advances an instant by one recurrence unit.
    ///
    /// Yearly stepping goes through chrono's month arithmetic, which clamps
    /// Feb 29 to Feb 28 in non-leap target years.
    fn advance(self, at: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            Self::Daily => at.checked_add_days(Days::new(1)),
            Self::Weekly => at.checked_add_days(Days::new(7)),
            Self::Biweekly => at.checked_add_days(Days::new(14)),
            Self::Yearly => at.checked_add_months(Months::new(12)),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Yearly => "yearly",
        };
        f.write_str(name)
    }
}

/// A repetition frequency with its inclusive calendar-date end bound.
///
/// "No recurrence" is `Option::<RecurrenceRule>::None` at the call sites:
/// one instance, no series identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    /// Last calendar date on which an instance may start, inclusive.
    pub end_bound: NaiveDate,
}

/// Expansion limits, passed in explicitly rather than read from ambient
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpanderConfig {
    /// Hard cap on emitted instances per series.
    pub max_instances: usize,
}

impl Default for ExpanderConfig {
    fn default() -> Self {
        Self {
            max_instances: DEFAULT_SERIES_CAP,
        }
    }
}

impl From<&SchedulingConfig> for ExpanderConfig {
    fn from(config: &SchedulingConfig) -> Self {
        Self {
            max_instances: config.series_cap,
        }
    }
}

/// ## Summary
/// Expands a template under a recurrence rule into the ordered instance
/// sequence to persist.
///
/// Without a rule the result is a single standalone instance. With a rule,
/// instances are emitted from the template's start/end and advanced one
/// recurrence unit at a time; every instance shares one `SeriesId`, supplied
/// by the caller or freshly generated. The loop emits before it checks the
/// bound, so at least one instance is produced even when the end bound
/// already precedes the template start; callers render that first occurrence
/// rather than losing the event.
///
/// ## Errors
/// Returns `ServiceError::InvalidTemplate` when the template fails
/// validation, and `ServiceError::InvariantViolation` if calendar arithmetic
/// leaves chrono's representable range.
#[tracing::instrument(skip_all, fields(rule = ?rule, cap = config.max_instances))]
pub fn expand(
    template: &EventTemplate,
    rule: Option<&RecurrenceRule>,
    series_id: Option<SeriesId>,
    config: ExpanderConfig,
) -> ServiceResult<Vec<NewEventInstance>> {
    template.validate()?;

    let Some(rule) = rule else {
        tracing::trace!("No recurrence rule, emitting one standalone instance");
        return Ok(vec![template.to_new_instance(template.start, template.end, None)]);
    };

    let series_id = series_id.unwrap_or_else(SeriesId::generate);
    let mut instances = Vec::new();
    let mut start = template.start;
    let mut end = template.end;

    loop {
        instances.push(template.to_new_instance(start, end, Some(series_id)));
        if instances.len() >= config.max_instances {
            break;
        }
        start = rule.frequency.advance(start).ok_or(
            ServiceError::InvariantViolation("recurrence start left the calendar range"),
        )?;
        end = rule.frequency.advance(end).ok_or(ServiceError::InvariantViolation(
            "recurrence end left the calendar range",
        ))?;
        // Inclusive bound: a start landing exactly on the bound still emits.
        if start.date() > rule.end_bound {
            break;
        }
    }

    tracing::debug!(count = instances.len(), %series_id, "Expanded recurrence rule");
    Ok(instances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use maktab_core::types::ActivityType;

    fn at(y: i32, m: u32, d: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .expect("valid date")
            .and_hms_opt(hour, 0, 0)
            .expect("valid time")
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn template(start: NaiveDateTime, end: NaiveDateTime) -> EventTemplate {
        EventTemplate {
            title: "Fiqh class".to_string(),
            activity_type: ActivityType::Class,
            start,
            end,
            teacher: Some("t-11".to_string()),
            room: Some("r-3".to_string()),
            branch: None,
            level: None,
        }
    }

    fn rule(frequency: Frequency, end_bound: NaiveDate) -> RecurrenceRule {
        RecurrenceRule {
            frequency,
            end_bound,
        }
    }

    #[test]
    fn test_no_rule_yields_one_standalone_instance() {
        let t = template(at(2025, 1, 6, 10), at(2025, 1, 6, 11));
        let instances = expand(&t, None, None, ExpanderConfig::default()).expect("expand");

        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].series_id, None);
        assert_eq!(instances[0].start, t.start);
        assert_eq!(instances[0].end, t.end);
    }

    #[test]
    fn test_weekly_expansion_inclusive_bound() {
        // Jan 6 weekly until Jan 27: four Mondays, 10:00-11:00 each.
        let t = template(at(2025, 1, 6, 10), at(2025, 1, 6, 11));
        let r = rule(Frequency::Weekly, date(2025, 1, 27));
        let instances = expand(&t, Some(&r), None, ExpanderConfig::default()).expect("expand");

        let days: Vec<u32> = instances.iter().map(|i| i.start.day()).collect();
        assert_eq!(days, vec![6, 13, 20, 27]);
        for instance in &instances {
            assert_eq!(instance.start.hour(), 10);
            assert_eq!(instance.end.hour(), 11);
            assert_eq!(instance.title, t.title);
            assert_eq!(instance.teacher, t.teacher);
        }
    }

    #[test]
    fn test_biweekly_expansion() {
        let t = template(at(2025, 1, 6, 10), at(2025, 1, 6, 11));
        let r = rule(Frequency::Biweekly, date(2025, 2, 3));
        let instances = expand(&t, Some(&r), None, ExpanderConfig::default()).expect("expand");

        let starts: Vec<NaiveDate> = instances.iter().map(|i| i.start.date()).collect();
        assert_eq!(
            starts,
            vec![date(2025, 1, 6), date(2025, 1, 20), date(2025, 2, 3)]
        );
    }

    #[test]
    fn test_shared_series_id_and_strict_ordering() {
        let t = template(at(2025, 1, 1, 8), at(2025, 1, 1, 9));
        let r = rule(Frequency::Daily, date(2025, 1, 10));
        let instances = expand(&t, Some(&r), None, ExpanderConfig::default()).expect("expand");

        let series_id = instances[0].series_id.expect("series id");
        assert!(instances.iter().all(|i| i.series_id == Some(series_id)));
        for pair in instances.windows(2) {
            assert!(pair[0].start < pair[1].start);
            assert_eq!(
                pair[1].start - pair[0].start,
                chrono::TimeDelta::days(1),
                "daily gap must be one calendar day"
            );
        }
    }

    #[test]
    fn test_caller_supplied_series_id_is_kept() {
        let series_id = SeriesId::generate();
        let t = template(at(2025, 1, 6, 10), at(2025, 1, 6, 11));
        let r = rule(Frequency::Weekly, date(2025, 1, 20));
        let instances =
            expand(&t, Some(&r), Some(series_id), ExpanderConfig::default()).expect("expand");

        assert!(instances.iter().all(|i| i.series_id == Some(series_id)));
    }

    #[test]
    fn test_cap_bounds_unbounded_rule() {
        let t = template(at(2025, 1, 1, 8), at(2025, 1, 1, 9));
        let r = rule(Frequency::Daily, date(2100, 1, 1));
        let instances = expand(&t, Some(&r), None, ExpanderConfig::default()).expect("expand");

        assert_eq!(instances.len(), 365);
    }

    #[test]
    fn test_cap_is_configuration_not_ambient() {
        let t = template(at(2025, 1, 1, 8), at(2025, 1, 1, 9));
        let r = rule(Frequency::Daily, date(2100, 1, 1));
        let config = ExpanderConfig { max_instances: 10 };
        let instances = expand(&t, Some(&r), None, config).expect("expand");

        assert_eq!(instances.len(), 10);
    }

    #[test]
    fn test_end_bound_before_start_still_emits_once() {
        // Kept reference behavior: emit-before-check produces the first
        // occurrence even when the bound is already exceeded.
        let t = template(at(2025, 3, 10, 10), at(2025, 3, 10, 11));
        let r = rule(Frequency::Weekly, date(2025, 3, 1));
        let instances = expand(&t, Some(&r), None, ExpanderConfig::default()).expect("expand");

        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].start, t.start);
        assert!(instances[0].series_id.is_some());
    }

    #[test]
    fn test_yearly_from_leap_day_normalizes() {
        let t = template(at(2024, 2, 29, 9), at(2024, 2, 29, 10));
        let r = rule(Frequency::Yearly, date(2026, 3, 1));
        let instances = expand(&t, Some(&r), None, ExpanderConfig::default()).expect("expand");

        let starts: Vec<NaiveDate> = instances.iter().map(|i| i.start.date()).collect();
        assert_eq!(
            starts,
            vec![date(2024, 2, 29), date(2025, 2, 28), date(2026, 2, 28)]
        );
        assert!(instances.iter().all(|i| i.start.hour() == 9));
    }

    #[test]
    fn test_invalid_template_rejected_before_expansion() {
        let t = template(at(2025, 1, 6, 11), at(2025, 1, 6, 10));
        let r = rule(Frequency::Daily, date(2025, 2, 1));
        let err = expand(&t, Some(&r), None, ExpanderConfig::default()).expect_err("should reject");

        assert!(matches!(err, ServiceError::InvalidTemplate(_)));
    }

    #[test]
    fn test_multi_day_event_keeps_duration_shape() {
        // A two-day vacation recurring yearly keeps its two-day span.
        let t = EventTemplate {
            title: "Mid-year break".to_string(),
            activity_type: ActivityType::Vacation,
            start: at(2025, 1, 20, 0),
            end: at(2025, 1, 22, 0),
            teacher: None,
            room: None,
            branch: None,
            level: None,
        };
        let r = rule(Frequency::Yearly, date(2026, 12, 31));
        let instances = expand(&t, Some(&r), None, ExpanderConfig::default()).expect("expand");

        assert_eq!(instances.len(), 2);
        for instance in &instances {
            assert_eq!(instance.end - instance.start, chrono::TimeDelta::days(2));
        }
    }
}
