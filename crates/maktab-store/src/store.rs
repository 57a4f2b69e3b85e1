//! The document-store seam consumed by the scheduling services.

use chrono::NaiveDateTime;

use maktab_core::types::{InstanceId, SeriesId};

use crate::error::StoreResult;
use crate::model::event::{EventInstance, EventInstancePatch, NewEventInstance};

/// Async boundary to the events collection of the hosted document database.
///
/// Mutations are not transactional across calls: callers sequence their own
/// delete and insert phases and must tolerate observing the gap between them.
#[expect(
    async_fn_in_trait,
    reason = "store futures are driven on one runtime and never spawned"
)]
pub trait InstanceStore {
    /// Fetches every instance in the events collection, ordered by start.
    ///
    /// ## Errors
    /// Returns a `StoreError` when the backing store fails.
    async fn fetch_all(&self) -> StoreResult<Vec<EventInstance>>;

    /// Inserts one instance and returns the id the store assigned.
    ///
    /// ## Errors
    /// Returns a `StoreError` when the backing store fails.
    async fn insert(&self, instance: NewEventInstance) -> StoreResult<InstanceId>;

    /// Inserts a batch of instances, returning ids in input order.
    ///
    /// ## Errors
    /// Returns a `StoreError` when the backing store fails; the batch is not
    /// atomic beyond what the backend provides.
    async fn insert_batch(&self, instances: Vec<NewEventInstance>) -> StoreResult<Vec<InstanceId>>;

    /// Applies a partial update to one instance.
    ///
    /// ## Errors
    /// Returns `StoreError::InstanceNotFound` if the id is absent.
    async fn update(&self, id: InstanceId, patch: EventInstancePatch) -> StoreResult<()>;

    /// Deletes one instance. Deleting an absent id is a no-op, which keeps
    /// re-running a mutation's delete phase idempotent.
    ///
    /// ## Errors
    /// Returns a `StoreError` when the backing store fails.
    async fn delete_by_id(&self, id: InstanceId) -> StoreResult<()>;

    /// Range delete over one series: every instance carrying `series_id`,
    /// restricted to `start >= start_at` when a bound is given.
    ///
    /// ## Errors
    /// Returns a `StoreError` when the backing store fails.
    async fn delete_where(
        &self,
        series_id: SeriesId,
        start_at: Option<NaiveDateTime>,
    ) -> StoreResult<()>;
}
