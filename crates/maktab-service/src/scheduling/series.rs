//! Series mutation: scoped edits and deletes over recurring event instances.
//!
//! Every mutation is computed first as a [`MutationPlan`] (a removal set and
//! an insert set) without touching any stored instance, then applied to the
//! store in two ordered phases: deletes, then one batched insert. Existing
//! instances are never patched in place; a replaced instance is a new row.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use maktab_core::types::{InstanceId, SeriesId};
use maktab_store::model::event::{EventInstance, NewEventInstance};
use maktab_store::store::InstanceStore;

use crate::error::ServiceResult;
use crate::scheduling::recurrence::{ExpanderConfig, RecurrenceRule, expand};
use crate::scheduling::template::EventTemplate;

/// Breadth of an edit relative to the anchor's series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditScope {
    /// Replace only the anchor instance.
    Single,
    /// Replace the anchor and everything after it in its series.
    Future,
    /// Replace the whole series.
    All,
}

/// Breadth of a delete relative to the anchor's series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteScope {
    Single,
    Future,
    AllSeries,
}

/// A scoped edit of one instance of a (possible) series.
#[derive(Debug, Clone)]
pub struct EditRequest {
    /// The instance the user selected.
    pub anchor: EventInstance,
    /// Replacement content.
    pub template: EventTemplate,
    /// Replacement recurrence; `None` means no recurrence.
    pub rule: Option<RecurrenceRule>,
    pub scope: EditScope,
}

/// A scoped delete anchored at one instance.
#[derive(Debug, Clone)]
pub struct DeleteRequest {
    pub anchor: EventInstance,
    pub scope: DeleteScope,
}

/// The removal half of a mutation plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    /// Individual instances, deleted one by one.
    ById(Vec<InstanceId>),
    /// A series range, mapped onto the store's `delete_where` primitive.
    Series {
        series_id: SeriesId,
        /// `Some`: only instances with `start >= start_at`. `None`: all.
        start_at: Option<NaiveDateTime>,
    },
}

/// Instances to remove and instances to insert; the only side-effect shape
/// the engine produces.
#[derive(Debug, Clone)]
pub struct MutationPlan {
    pub removal: Removal,
    pub inserts: Vec<NewEventInstance>,
}

fn anchor_resolvable(existing: &[EventInstance], anchor: &EventInstance) -> bool {
    existing.iter().any(|i| i.id == anchor.id)
}

/// ## Summary
/// Computes the plan for a scoped edit.
///
/// - `Single` replaces only the anchor, keeping its series membership;
///   siblings are never regenerated. The one exception is a standalone
///   anchor edited with a recurrence rule, which is deleted and replaced by
///   a freshly expanded series. This is the only standalone-to-series path.
/// - `Future` removes the anchor's series from the anchor's start onward and
///   inserts a fresh expansion under a new `SeriesId`, leaving earlier
///   instances exactly as they were.
/// - `All` removes the whole series and inserts a fresh expansion.
///
/// `Future`/`All` degrade to `Single` when the anchor is standalone or is
/// not among `existing`; degradation is never an error.
///
/// ## Errors
/// Returns `ServiceError::InvalidTemplate` when the replacement template
/// fails validation.
pub fn plan_edit(
    existing: &[EventInstance],
    request: &EditRequest,
    config: ExpanderConfig,
) -> ServiceResult<MutationPlan> {
    let series_id = request
        .anchor
        .series_id
        .filter(|_| anchor_resolvable(existing, &request.anchor));

    match (request.scope, series_id) {
        // A standalone or unresolvable anchor degrades every scope to single.
        (EditScope::Single, _) | (EditScope::Future | EditScope::All, None) => {
            plan_single_edit(request, config)
        }
        (EditScope::Future, Some(series_id)) => {
            let inserts = expand(&request.template, request.rule.as_ref(), None, config)?;
            Ok(MutationPlan {
                removal: Removal::Series {
                    series_id,
                    start_at: Some(request.anchor.start),
                },
                inserts,
            })
        }
        (EditScope::All, Some(series_id)) => {
            let inserts = expand(&request.template, request.rule.as_ref(), None, config)?;
            Ok(MutationPlan {
                removal: Removal::Series {
                    series_id,
                    start_at: None,
                },
                inserts,
            })
        }
    }
}

fn plan_single_edit(request: &EditRequest, config: ExpanderConfig) -> ServiceResult<MutationPlan> {
    if request.anchor.is_standalone() && request.rule.is_some() {
        // Standalone picked up a recurrence: replace it with a new series.
        let inserts = expand(&request.template, request.rule.as_ref(), None, config)?;
        return Ok(MutationPlan {
            removal: Removal::ById(vec![request.anchor.id]),
            inserts,
        });
    }

    // In-place replacement; recurrence fields are ignored for this scope and
    // the anchor's series membership carries over unchanged.
    request.template.validate()?;
    let replacement = request.template.to_new_instance(
        request.template.start,
        request.template.end,
        request.anchor.series_id,
    );
    Ok(MutationPlan {
        removal: Removal::ById(vec![request.anchor.id]),
        inserts: vec![replacement],
    })
}

/// ## Summary
/// Computes the plan for a scoped delete.
///
/// `Single` removes exactly the anchor regardless of series membership.
/// `Future` removes the anchor and every series sibling starting at or after
/// it, leaving the earlier instances as a truncated fragment with their
/// original `SeriesId`. `AllSeries` removes the whole series. `Future` and
/// `AllSeries` degrade to `Single` for a standalone anchor.
#[must_use]
pub fn plan_delete(request: &DeleteRequest) -> MutationPlan {
    let removal = match (request.scope, request.anchor.series_id) {
        (DeleteScope::Single, _) | (_, None) => Removal::ById(vec![request.anchor.id]),
        (DeleteScope::Future, Some(series_id)) => Removal::Series {
            series_id,
            start_at: Some(request.anchor.start),
        },
        (DeleteScope::AllSeries, Some(series_id)) => Removal::Series {
            series_id,
            start_at: None,
        },
    };
    MutationPlan {
        removal,
        inserts: Vec::new(),
    }
}

/// ## Summary
/// Applies a plan to the store: the delete phase first, then one batched
/// insert, returning the ids of the inserted instances.
///
/// No retry and no rollback; a failure between the phases leaves the store
/// transiently inconsistent and the caller re-fetches and re-runs. The
/// delete phase is idempotent because deleting an absent id is a store-level
/// no-op.
///
/// ## Errors
/// Propagates store errors unmodified.
#[tracing::instrument(skip_all, fields(removal = ?plan.removal, inserts = plan.inserts.len()))]
pub async fn apply<S: InstanceStore>(
    store: &S,
    plan: MutationPlan,
) -> ServiceResult<Vec<InstanceId>> {
    match &plan.removal {
        Removal::ById(ids) => {
            for id in ids {
                store.delete_by_id(*id).await?;
            }
        }
        Removal::Series {
            series_id,
            start_at,
        } => {
            store.delete_where(*series_id, *start_at).await?;
        }
    }

    if plan.inserts.is_empty() {
        return Ok(Vec::new());
    }
    let ids = store.insert_batch(plan.inserts).await?;
    tracing::debug!(count = ids.len(), "Applied mutation plan");
    Ok(ids)
}

/// Command dispatcher for create/edit/delete of timetable series.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesMutationEngine {
    config: ExpanderConfig,
}

impl SeriesMutationEngine {
    #[must_use]
    pub const fn new(config: ExpanderConfig) -> Self {
        Self { config }
    }

    /// ## Summary
    /// Expands a new template and persists the resulting instances.
    ///
    /// ## Errors
    /// Returns `ServiceError::InvalidTemplate` for a rejected template and
    /// propagates store errors.
    pub async fn create<S: InstanceStore>(
        &self,
        store: &S,
        template: &EventTemplate,
        rule: Option<&RecurrenceRule>,
    ) -> ServiceResult<Vec<InstanceId>> {
        let instances = expand(template, rule, None, self.config)?;
        Ok(store.insert_batch(instances).await?)
    }

    /// ## Summary
    /// Plans and applies a scoped edit against the store's current contents.
    ///
    /// ## Errors
    /// Returns `ServiceError::InvalidTemplate` for a rejected replacement
    /// template and propagates store errors.
    pub async fn edit<S: InstanceStore>(
        &self,
        store: &S,
        request: &EditRequest,
    ) -> ServiceResult<Vec<InstanceId>> {
        let existing = store.fetch_all().await?;
        let plan = plan_edit(&existing, request, self.config)?;
        apply(store, plan).await
    }

    /// ## Summary
    /// Plans and applies a scoped delete.
    ///
    /// ## Errors
    /// Propagates store errors.
    pub async fn delete<S: InstanceStore>(
        &self,
        store: &S,
        request: &DeleteRequest,
    ) -> ServiceResult<()> {
        let plan = plan_delete(request);
        apply(store, plan).await?;
        Ok(())
    }
}
