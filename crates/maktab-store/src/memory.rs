//! In-memory events collection.
//!
//! Stands in for the hosted document database behind [`InstanceStore`];
//! used by the scheduling services' tests and by local tooling.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use tokio::sync::RwLock;

use maktab_core::constants::EVENTS_COLLECTION;
use maktab_core::types::{InstanceId, SeriesId};

use crate::error::{StoreError, StoreResult};
use crate::model::event::{EventInstance, EventInstancePatch, NewEventInstance};
use crate::store::InstanceStore;

/// In-memory document store keyed by instance id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    events: RwLock<HashMap<InstanceId, EventInstance>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored instances.
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

impl InstanceStore for MemoryStore {
    async fn fetch_all(&self) -> StoreResult<Vec<EventInstance>> {
        let events = self.events.read().await;
        let mut all: Vec<EventInstance> = events.values().cloned().collect();
        all.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.0.cmp(&b.id.0)));
        Ok(all)
    }

    async fn insert(&self, instance: NewEventInstance) -> StoreResult<InstanceId> {
        let id = InstanceId::generate();
        tracing::trace!(%id, collection = EVENTS_COLLECTION, start = %instance.start, "Inserting instance");
        self.events
            .write()
            .await
            .insert(id, instance.into_instance(id));
        Ok(id)
    }

    async fn insert_batch(&self, instances: Vec<NewEventInstance>) -> StoreResult<Vec<InstanceId>> {
        let mut events = self.events.write().await;
        let mut ids = Vec::with_capacity(instances.len());
        for instance in instances {
            let id = InstanceId::generate();
            events.insert(id, instance.into_instance(id));
            ids.push(id);
        }
        tracing::trace!(count = ids.len(), "Inserted instance batch");
        Ok(ids)
    }

    async fn update(&self, id: InstanceId, patch: EventInstancePatch) -> StoreResult<()> {
        let mut events = self.events.write().await;
        let instance = events.get_mut(&id).ok_or(StoreError::InstanceNotFound(id))?;
        patch.apply_to(instance);
        Ok(())
    }

    async fn delete_by_id(&self, id: InstanceId) -> StoreResult<()> {
        let removed = self.events.write().await.remove(&id).is_some();
        tracing::trace!(%id, removed, "Deleted instance by id");
        Ok(())
    }

    async fn delete_where(
        &self,
        series_id: SeriesId,
        start_at: Option<NaiveDateTime>,
    ) -> StoreResult<()> {
        let mut events = self.events.write().await;
        let before = events.len();
        events.retain(|_, instance| {
            if !instance.in_series(series_id) {
                return true;
            }
            match start_at {
                Some(bound) => instance.start < bound,
                None => false,
            }
        });
        tracing::trace!(
            %series_id,
            collection = EVENTS_COLLECTION,
            removed = before - events.len(),
            "Range-deleted series instances"
        );
        Ok(())
    }
}
