/// Document-store collection names shared across crates
pub const EVENTS_COLLECTION: &str = "events";

/// Hard cap on the number of instances one recurrence expansion may emit.
///
/// Guarantees termination regardless of the end bound a caller supplies.
/// Passed into the expander through `SchedulingConfig`, never read as
/// ambient state.
pub const DEFAULT_SERIES_CAP: usize = 365;
