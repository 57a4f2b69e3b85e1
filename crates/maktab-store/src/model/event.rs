use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use maktab_core::types::{ActivityType, InstanceId, SeriesId};

/// Persisted timetable event occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInstance {
    pub id: InstanceId,
    /// Set when the instance was expanded from a recurrence rule; `None`
    /// for standalone events.
    pub series_id: Option<SeriesId>,
    pub title: String,
    pub activity_type: ActivityType,
    /// Local wall-clock start; scheduling is timezone-naive.
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub teacher: Option<String>,
    pub room: Option<String>,
    pub branch: Option<String>,
    pub level: Option<String>,
}

impl EventInstance {
    #[must_use]
    pub const fn is_standalone(&self) -> bool {
        self.series_id.is_none()
    }

    #[must_use]
    pub fn in_series(&self, series_id: SeriesId) -> bool {
        self.series_id == Some(series_id)
    }
}

/// Insert struct for new event instances; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEventInstance {
    pub series_id: Option<SeriesId>,
    pub title: String,
    pub activity_type: ActivityType,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub teacher: Option<String>,
    pub room: Option<String>,
    pub branch: Option<String>,
    pub level: Option<String>,
}

impl NewEventInstance {
    #[must_use]
    pub fn into_instance(self, id: InstanceId) -> EventInstance {
        EventInstance {
            id,
            series_id: self.series_id,
            title: self.title,
            activity_type: self.activity_type,
            start: self.start,
            end: self.end,
            teacher: self.teacher,
            room: self.room,
            branch: self.branch,
            level: self.level,
        }
    }
}

/// Partial update for one instance, document-store patch semantics.
///
/// `None` fields are left untouched; `series_id` is doubly optional so a
/// patch can clear series membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInstancePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_id: Option<Option<SeriesId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<ActivityType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Option<String>>,
}

impl EventInstancePatch {
    pub(crate) fn apply_to(&self, instance: &mut EventInstance) {
        if let Some(series_id) = self.series_id {
            instance.series_id = series_id;
        }
        if let Some(title) = &self.title {
            instance.title = title.clone();
        }
        if let Some(activity_type) = self.activity_type {
            instance.activity_type = activity_type;
        }
        if let Some(start) = self.start {
            instance.start = start;
        }
        if let Some(end) = self.end {
            instance.end = end;
        }
        if let Some(teacher) = &self.teacher {
            instance.teacher = teacher.clone();
        }
        if let Some(room) = &self.room {
            instance.room = room.clone();
        }
        if let Some(branch) = &self.branch {
            instance.branch = branch.clone();
        }
        if let Some(level) = &self.level {
            instance.level = level.clone();
        }
    }
}
