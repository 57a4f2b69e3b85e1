use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use maktab_core::types::{ActivityType, SeriesId};
use maktab_store::model::event::NewEventInstance;

use crate::error::{ServiceError, ServiceResult};

/// User-authored content of one occurrence, consumed by expansion.
///
/// Transient: a template is validated, expanded into instances, and dropped.
/// The opaque reference fields (teacher, room, branch, level) are foreign
/// identifiers the scheduling core never interprets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTemplate {
    pub title: String,
    pub activity_type: ActivityType,
    /// Local wall-clock start of the first occurrence.
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub teacher: Option<String>,
    pub room: Option<String>,
    pub branch: Option<String>,
    pub level: Option<String>,
}

impl EventTemplate {
    /// ## Summary
    /// Checks the template before any expansion touches the store.
    ///
    /// ## Errors
    /// Returns `ServiceError::InvalidTemplate` when the title is empty or
    /// the end instant precedes the start.
    pub fn validate(&self) -> ServiceResult<()> {
        if self.title.trim().is_empty() {
            return Err(ServiceError::InvalidTemplate(
                "title must not be empty".to_string(),
            ));
        }
        if self.end < self.start {
            return Err(ServiceError::InvalidTemplate(format!(
                "end {} precedes start {}",
                self.end, self.start
            )));
        }
        Ok(())
    }

    /// Materializes one occurrence of this template at a concrete slot.
    #[must_use]
    pub(crate) fn to_new_instance(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        series_id: Option<SeriesId>,
    ) -> NewEventInstance {
        NewEventInstance {
            series_id,
            title: self.title.clone(),
            activity_type: self.activity_type,
            start,
            end,
            teacher: self.teacher.clone(),
            room: self.room.clone(),
            branch: self.branch.clone(),
            level: self.level.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 6)
            .expect("valid date")
            .and_hms_opt(hour, 0, 0)
            .expect("valid time")
    }

    fn template() -> EventTemplate {
        EventTemplate {
            title: "Math revision".to_string(),
            activity_type: ActivityType::Class,
            start: at(10),
            end: at(11),
            teacher: None,
            room: None,
            branch: None,
            level: None,
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_template() {
        assert!(template().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        let mut t = template();
        t.title = "   ".to_string();
        let err = t.validate().expect_err("should reject");
        assert!(matches!(err, ServiceError::InvalidTemplate(_)));
    }

    #[test]
    fn test_validate_rejects_end_before_start() {
        let mut t = template();
        t.end = at(9);
        let err = t.validate().expect_err("should reject");
        assert!(matches!(err, ServiceError::InvalidTemplate(_)));
    }

    #[test]
    fn test_validate_accepts_zero_length_event() {
        let mut t = template();
        t.end = t.start;
        assert!(t.validate().is_ok());
    }
}
