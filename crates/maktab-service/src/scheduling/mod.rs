pub mod recurrence;
pub mod series;
pub mod template;
