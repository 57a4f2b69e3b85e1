//! Dual-calendar (Gregorian/Hijri) date mapping for timetable display.
//!
//! The Hijri side is the Umm al-Qura calendar as implemented by ICU4X; this
//! crate never hand-rolls Hijri arithmetic. All APIs are infallible: a date
//! that cannot be mapped yields blank parts so views always have something
//! renderable.

pub mod hijri;
pub mod label;

pub use hijri::{LunarParts, lunar_day, lunar_parts};
pub use label::{compose_month_label, dual_day_label, dual_month_label};
