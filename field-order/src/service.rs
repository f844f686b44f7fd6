//! High-level service combining the store with a persistence backend

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::action::FieldAction;
use crate::error::{FieldOrderError, Result};
use crate::logging::Pretty;
use crate::set::FieldChange;
use crate::storage::FieldConfigStorage;
use crate::store::FieldStore;
use crate::types::{FieldId, FieldRecord, Projection};

/// Persistence bookkeeping for a service.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncStatus {
    /// State changed since the last successful load or save
    pub dirty: bool,
    pub last_saved_at: Option<DateTime<Utc>>,
    /// Message of the most recent failed operation, cleared on success
    pub last_error: Option<String>,
}

/// Field configuration service
pub struct FieldConfigService {
    store: FieldStore,
    storage: Box<dyn FieldConfigStorage>,
    status: SyncStatus,
}

impl FieldConfigService {
    pub fn new(store: FieldStore, storage: Box<dyn FieldConfigStorage>) -> Self {
        Self {
            store,
            storage,
            status: SyncStatus::default(),
        }
    }

    pub fn store(&self) -> &FieldStore {
        &self.store
    }

    pub fn status(&self) -> &SyncStatus {
        &self.status
    }

    pub fn get_all(&self) -> &[FieldRecord] {
        self.store.get_all()
    }

    /// Replace the store contents with what storage holds.
    ///
    /// Stored data that needed normalizing leaves the service dirty so the
    /// next save writes the dense form back.
    pub async fn load(&mut self) -> Result<()> {
        let result = match self.storage.load().await {
            Ok(records) => {
                let stored = records.clone();
                self.store
                    .replace_all(records)
                    .map(|_| self.store.get_all() != stored.as_slice())
            }
            Err(e) => Err(e),
        };
        let normalized = self.settle(result, "load")?;
        self.status.dirty = normalized;
        if normalized {
            info!("stored field config normalized to dense orders");
        }
        info!(fields = self.store.get_all().len(), "field config loaded");
        debug!("loaded fields: {}", Pretty(self.store.get_all()));
        Ok(())
    }

    /// Load, or seed storage with the current state when it holds nothing yet.
    pub async fn load_or_seed(&mut self) -> Result<()> {
        match self.load().await {
            Err(FieldOrderError::StorageNotInitialized { .. }) => {
                info!("field storage empty, seeding from catalog");
                self.save().await
            }
            other => other,
        }
    }

    /// Persist the current snapshot.
    pub async fn save(&mut self) -> Result<()> {
        let snapshot = self.store.snapshot();
        let result = self.storage.save(&snapshot).await;
        self.settle(result, "save")?;
        self.status.dirty = false;
        self.status.last_saved_at = Some(Utc::now());
        info!(fields = snapshot.len(), "field config saved");
        Ok(())
    }

    pub fn set_visibility(
        &mut self,
        id: FieldId,
        projection: Projection,
        visible: bool,
    ) -> Result<Option<FieldChange>> {
        let result = self.store.set_visibility(id, projection, visible);
        self.track(result, "set visibility")
    }

    pub fn set_order(
        &mut self,
        id: FieldId,
        projection: Projection,
        order: Option<u32>,
    ) -> Result<Option<FieldChange>> {
        let result = self.store.set_order(id, projection, order);
        self.track(result, "set order")
    }

    pub fn apply_batch(&mut self, actions: &[FieldAction]) -> Result<Option<FieldChange>> {
        let result = self.store.apply_batch(actions);
        self.track(result, "apply actions")
    }

    pub fn reset(&mut self) -> Option<FieldChange> {
        let change = self.store.reset();
        if change.is_some() {
            self.status.dirty = true;
        }
        change
    }

    pub fn available_orders(&self, projection: Projection) -> Vec<u32> {
        self.store.available_orders(projection)
    }

    pub fn checked_count(&self, projection: Projection) -> usize {
        self.store.checked_count(projection)
    }

    fn track(
        &mut self,
        result: Result<Option<FieldChange>>,
        op: &str,
    ) -> Result<Option<FieldChange>> {
        let change = self.settle(result, op)?;
        if change.is_some() {
            self.status.dirty = true;
        }
        Ok(change)
    }

    fn settle<T>(&mut self, result: Result<T>, op: &str) -> Result<T> {
        match result {
            Ok(value) => {
                self.status.last_error = None;
                Ok(value)
            }
            Err(e @ FieldOrderError::StorageNotInitialized { .. }) => {
                debug!(op, error = %e, "field storage has no data yet");
                self.status.last_error = Some(e.to_string());
                Err(e)
            }
            Err(e) => {
                warn!(op, error = %e, "field config operation rejected");
                self.status.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
