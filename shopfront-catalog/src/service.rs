//! Catalog service: the application layer over the pure store operations
//!
//! Owns the canonical in-memory snapshot behind a mutex, so mutations
//! are serialized (single writer per process). Each mutation applies a
//! pure store transform, saves the result with bounded retry, and only
//! then commits it to memory; an exhausted save leaves the last
//! known-good snapshot in place (optimistic-update rollback) and
//! surfaces the persistence error.

use crate::persistence::SnapshotStore;
use crate::reconcile::ReconcileEngine;
use crate::retry::{self, RetryPolicy};
use crate::store::{self, ItemUpdate, NewItem};
use chrono::Utc;
use shopfront_common::events::{CatalogEvent, EventBus};
use shopfront_common::model::{Item, ItemIdGenerator, Snapshot};
use shopfront_common::Result;
use tokio::sync::{broadcast, Mutex, MutexGuard};

pub struct CatalogService {
    snapshot: Mutex<Snapshot>,
    persistence: SnapshotStore,
    engine: ReconcileEngine,
    ids: ItemIdGenerator,
    events: EventBus,
    retry_policy: RetryPolicy,
}

impl CatalogService {
    /// Create the service, loading the snapshot from durable storage
    pub fn new(
        persistence: SnapshotStore,
        engine: ReconcileEngine,
        events: EventBus,
        retry_policy: RetryPolicy,
    ) -> Self {
        let snapshot = persistence.load();
        tracing::info!(
            items = snapshot.items.len(),
            categories = snapshot.categories.len(),
            assigned = !snapshot.assignment_is_empty(),
            "Catalog loaded"
        );
        Self {
            snapshot: Mutex::new(snapshot),
            persistence,
            engine,
            ids: ItemIdGenerator::new(),
            events,
            retry_policy,
        }
    }

    /// Subscribe to catalog events
    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.events.subscribe()
    }

    /// Current in-memory snapshot, without reconciling
    pub async fn current(&self) -> Snapshot {
        self.snapshot.lock().await.clone()
    }

    /// Current snapshot, reconciled
    ///
    /// When the assignment is empty a reconciliation pass runs first and
    /// its result is persisted before being committed and returned.
    pub async fn catalog(&self) -> Result<Snapshot> {
        let mut guard = self.snapshot.lock().await;
        if guard.assignment_is_empty() {
            let (next, source) = self.engine.ensure_assigned(&guard).await;
            if source.is_some() {
                self.commit(&mut guard, next).await?;
            }
        }
        Ok(guard.clone())
    }

    /// Replace the full snapshot (admin bulk update surface)
    pub async fn replace(&self, snapshot: Snapshot) -> Result<()> {
        snapshot.validate()?;
        let mut guard = self.snapshot.lock().await;
        self.commit(&mut guard, snapshot).await?;
        Ok(())
    }

    /// Add a new item to the given category
    pub async fn add_item(&self, new: NewItem, category: &str) -> Result<Item> {
        let mut guard = self.snapshot.lock().await;
        let (next, item) = store::add_item(&guard, &self.ids, new, category)?;
        self.commit(&mut guard, next).await?;
        Ok(item)
    }

    /// Update an item, optionally moving it to another category
    pub async fn update_item(
        &self,
        id: &str,
        update: ItemUpdate,
        new_category: Option<&str>,
    ) -> Result<Snapshot> {
        let mut guard = self.snapshot.lock().await;
        let next = store::update_item(&guard, id, update, new_category)?;
        self.commit(&mut guard, next).await
    }

    /// Delete an item
    pub async fn delete_item(&self, id: &str) -> Result<Snapshot> {
        let mut guard = self.snapshot.lock().await;
        let next = store::delete_item(&guard, id)?;
        self.commit(&mut guard, next).await
    }

    /// Add an empty category (idempotent)
    pub async fn add_category(&self, name: &str) -> Result<Snapshot> {
        let mut guard = self.snapshot.lock().await;
        let next = store::add_category(&guard, name)?;
        self.commit(&mut guard, next).await
    }

    /// Rename a category (last-write-wins onto an existing name)
    pub async fn rename_category(&self, old_name: &str, new_name: &str) -> Result<Snapshot> {
        let mut guard = self.snapshot.lock().await;
        let next = store::rename_category(&guard, old_name, new_name)?;
        self.commit(&mut guard, next).await
    }

    /// Delete a category and every item assigned to it
    pub async fn delete_category(&self, name: &str) -> Result<Snapshot> {
        let mut guard = self.snapshot.lock().await;
        let next = store::delete_category(&guard, name)?;
        self.commit(&mut guard, next).await
    }

    /// Persist `next` and commit it to memory on success
    ///
    /// The in-memory snapshot is only replaced after the save succeeds,
    /// so a failed save rolls back to the last known-good state simply
    /// by leaving the guard untouched.
    async fn commit(&self, guard: &mut MutexGuard<'_, Snapshot>, next: Snapshot) -> Result<Snapshot> {
        let persistence = &self.persistence;
        let next_ref = &next;
        let save_result = retry::with_backoff("snapshot save", self.retry_policy, || async move {
            persistence.save(next_ref)
        })
        .await;

        if let Err(err) = save_result {
            self.events.emit(CatalogEvent::SaveFailed {
                message: err.to_string(),
                timestamp: Utc::now(),
            });
            return Err(err);
        }

        **guard = next.clone();
        self.events.emit(CatalogEvent::SnapshotUpdated {
            item_count: next.items.len(),
            category_count: next.categories.len(),
            timestamp: Utc::now(),
        });
        Ok(next)
    }
}
