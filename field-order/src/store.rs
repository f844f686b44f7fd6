//! FieldStore: a FieldSet plus change notification.
//!
//! Every effective mutation publishes a [`StoreEvent`] on a broadcast
//! channel after it commits. Subscribers therefore always observe the
//! post-mutation snapshot. No-ops and rejected mutations publish nothing.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::trace;

use crate::action::FieldAction;
use crate::catalog::FieldCatalog;
use crate::error::{FieldOrderError, Result};
use crate::set::{FieldChange, FieldSet};
use crate::types::{FieldId, FieldRecord, Projection};

/// Default broadcast buffer size.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Largest accepted broadcast buffer size. The channel allocates every slot
/// up front.
pub const MAX_EVENT_CAPACITY: usize = 65_536;

/// A committed change and the full state right after it.
#[derive(Debug, Clone)]
pub struct StoreEvent {
    pub change: FieldChange,
    pub records: Arc<Vec<FieldRecord>>,
}

/// Owner of the canonical field records.
#[derive(Debug)]
pub struct FieldStore {
    set: FieldSet,
    events: broadcast::Sender<StoreEvent>,
}

impl FieldStore {
    /// Create a store from seed records.
    pub fn new(records: Vec<FieldRecord>) -> Result<Self> {
        Self::with_capacity(records, DEFAULT_EVENT_CAPACITY)
    }

    /// Create a store with a specific event buffer size in
    /// `1..=MAX_EVENT_CAPACITY`.
    pub fn with_capacity(records: Vec<FieldRecord>, capacity: usize) -> Result<Self> {
        if !(1..=MAX_EVENT_CAPACITY).contains(&capacity) {
            return Err(FieldOrderError::InvalidCapacity {
                capacity,
                max: MAX_EVENT_CAPACITY,
            });
        }
        let (events, _) = broadcast::channel(capacity);
        Ok(Self {
            set: FieldSet::new(records)?,
            events,
        })
    }

    /// Create a store seeded from a catalog.
    pub fn from_catalog(catalog: &FieldCatalog) -> Result<Self> {
        Self::new(catalog.records())
    }

    /// Subscribe to change events.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub fn get_all(&self) -> &[FieldRecord] {
        self.set.get_all()
    }

    pub fn get(&self, id: FieldId) -> Option<&FieldRecord> {
        self.set.get(id)
    }

    /// Owned copy of the current records.
    pub fn snapshot(&self) -> Vec<FieldRecord> {
        self.set.get_all().to_vec()
    }

    pub fn available_orders(&self, projection: Projection) -> Vec<u32> {
        self.set.available_orders(projection)
    }

    pub fn checked_count(&self, projection: Projection) -> usize {
        self.set.checked_count(projection)
    }

    pub fn visible_in(&self, projection: Projection) -> Vec<&FieldRecord> {
        self.set.visible_in(projection)
    }

    pub fn set_visibility(
        &mut self,
        id: FieldId,
        projection: Projection,
        visible: bool,
    ) -> Result<Option<FieldChange>> {
        let change = self.set.set_visibility(id, projection, visible)?;
        Ok(self.publish(change))
    }

    pub fn set_order(
        &mut self,
        id: FieldId,
        projection: Projection,
        order: Option<u32>,
    ) -> Result<Option<FieldChange>> {
        let change = self.set.set_order(id, projection, order)?;
        Ok(self.publish(change))
    }

    pub fn reset(&mut self) -> Option<FieldChange> {
        let change = self.set.reset();
        self.publish(change)
    }

    /// Replace every record wholesale.
    pub fn replace_all(&mut self, records: Vec<FieldRecord>) -> Result<FieldChange> {
        let change = self.set.replace_all(records)?;
        self.publish(Some(change.clone()));
        Ok(change)
    }

    pub fn apply(&mut self, action: &FieldAction) -> Result<Option<FieldChange>> {
        let change = action.apply_to(&mut self.set)?;
        Ok(self.publish(change))
    }

    /// Apply all actions or none.
    ///
    /// Actions run against a scratch copy; the copy is committed only when
    /// every action succeeds, and a single `BatchApplied` event is sent.
    pub fn apply_batch(&mut self, actions: &[FieldAction]) -> Result<Option<FieldChange>> {
        let mut scratch = self.set.clone();
        for (index, action) in actions.iter().enumerate() {
            action
                .apply_to(&mut scratch)
                .map_err(|source| FieldOrderError::BatchFailed {
                    index,
                    source: Box::new(source),
                })?;
        }

        if scratch == self.set {
            return Ok(None);
        }
        self.set = scratch;
        Ok(self.publish(Some(FieldChange::BatchApplied {
            actions: actions.len(),
        })))
    }

    fn publish(&self, change: Option<FieldChange>) -> Option<FieldChange> {
        let change = change?;
        let event = StoreEvent {
            change: change.clone(),
            records: Arc::new(self.snapshot()),
        };
        // No receivers is fine; the store works without observers.
        if let Ok(receivers) = self.events.send(event) {
            trace!(receivers, ?change, "store event published");
        }
        Some(change)
    }
}
