//! Scheduling services: recurrence expansion, series mutation, and the
//! calendar-view formatting boundary.

pub mod error;
pub mod scheduling;
pub mod view;

pub use error::{ServiceError, ServiceResult};
pub use scheduling::recurrence::{ExpanderConfig, Frequency, RecurrenceRule, expand};
pub use scheduling::series::{
    DeleteRequest, DeleteScope, EditRequest, EditScope, MutationPlan, Removal,
    SeriesMutationEngine, apply, plan_delete, plan_edit,
};
pub use scheduling::template::EventTemplate;
