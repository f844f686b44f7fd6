//! FieldSet: the canonical list of field records and every mutation on it.
//!
//! Mutators validate first and only then write, so a returned error means
//! nothing changed. A successful mutation returns `Some(FieldChange)` when
//! state actually moved and `None` for a no-op.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FieldOrderError, Result};
use crate::reorder::reorder_in_place;
use crate::types::{FieldId, FieldRecord, Projection};

/// What a mutation did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "kebab-case")]
pub enum FieldChange {
    VisibilityChanged {
        id: FieldId,
        projection: Projection,
        visible: bool,
    },
    /// `id` took `other`'s order and `other` took `id`'s previous one.
    OrdersSwapped {
        id: FieldId,
        other: FieldId,
        projection: Projection,
    },
    Reset,
    Replaced,
    BatchApplied { actions: usize },
}

/// Ordered field records with an id index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    records: Vec<FieldRecord>,
    index: HashMap<FieldId, usize>,
}

impl FieldSet {
    /// Build a set from records, rejecting duplicate ids and normalizing
    /// both projections to dense sequences.
    pub fn new(records: Vec<FieldRecord>) -> Result<Self> {
        let mut set = Self::default();
        set.replace_all(records)?;
        Ok(set)
    }

    /// All records in catalog order.
    pub fn get_all(&self) -> &[FieldRecord] {
        &self.records
    }

    pub fn get(&self, id: FieldId) -> Option<&FieldRecord> {
        self.index.get(&id).map(|&i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records visible in `projection`.
    pub fn checked_count(&self, projection: Projection) -> usize {
        self.records
            .iter()
            .filter(|r| r.is_visible(projection))
            .count()
    }

    /// Orders a caller may assign: `[1..=k]` for `k` visible records.
    pub fn available_orders(&self, projection: Projection) -> Vec<u32> {
        (1..=self.checked_count(projection) as u32).collect()
    }

    /// Records visible in `projection`, sorted by order.
    pub fn visible_in(&self, projection: Projection) -> Vec<&FieldRecord> {
        let mut visible: Vec<&FieldRecord> = self
            .records
            .iter()
            .filter(|r| r.is_visible(projection))
            .collect();
        visible.sort_by_key(|r| (r.order(projection), r.id));
        visible
    }

    /// Show or hide a record in one projection.
    ///
    /// Showing appends the record after the current last position. Hiding
    /// clears its order and closes the gap. Repeating the current value is
    /// a no-op and keeps the existing order.
    pub fn set_visibility(
        &mut self,
        id: FieldId,
        projection: Projection,
        visible: bool,
    ) -> Result<Option<FieldChange>> {
        let idx = self.position(id)?;
        if self.records[idx].is_visible(projection) == visible {
            return Ok(None);
        }

        if visible {
            let next = self.max_order(projection) + 1;
            let state = self.records[idx].projection_mut(projection);
            state.visible = true;
            state.order = Some(next);
            debug!(%id, %projection, order = next, "field shown");
        } else {
            let state = self.records[idx].projection_mut(projection);
            state.visible = false;
            state.order = None;
            reorder_in_place(&mut self.records, projection);
            debug!(%id, %projection, "field hidden");
        }

        Ok(Some(FieldChange::VisibilityChanged {
            id,
            projection,
            visible,
        }))
    }

    /// Move a visible record to `order`, or hide it when `order` is `None`.
    ///
    /// If another visible record already holds `order`, the two exchange
    /// positions.
    pub fn set_order(
        &mut self,
        id: FieldId,
        projection: Projection,
        order: Option<u32>,
    ) -> Result<Option<FieldChange>> {
        let idx = self.position(id)?;
        let Some(order) = order else {
            return self.set_visibility(id, projection, false);
        };

        let current = *self.records[idx].projection(projection);
        if !current.visible {
            return Err(FieldOrderError::InvalidState { id, projection });
        }

        let max = self.checked_count(projection) as u32;
        if order == 0 || order > max {
            return Err(FieldOrderError::InvalidOrder { order, max });
        }
        if current.order == Some(order) {
            return Ok(None);
        }

        // Dense orders give every value in 1..=max exactly one holder.
        let holder = self.records.iter().position(|r| {
            r.id != id && r.is_visible(projection) && r.order(projection) == Some(order)
        });
        debug_assert!(holder.is_some(), "no holder for order {order} in {projection}");
        let Some(other_idx) = holder else {
            return Err(FieldOrderError::InvalidOrder { order, max });
        };

        self.records[idx].projection_mut(projection).order = Some(order);
        self.records[other_idx].projection_mut(projection).order = current.order;
        let other = self.records[other_idx].id;
        debug!(%id, %other, %projection, order, "field orders swapped");
        Ok(Some(FieldChange::OrdersSwapped {
            id,
            other,
            projection,
        }))
    }

    /// Hide every record in both projections.
    pub fn reset(&mut self) -> Option<FieldChange> {
        let any_visible = Projection::ALL
            .iter()
            .any(|&p| self.checked_count(p) > 0);
        if !any_visible {
            return None;
        }
        for record in &mut self.records {
            for projection in Projection::ALL {
                let state = record.projection_mut(projection);
                state.visible = false;
                state.order = None;
            }
        }
        debug!("all fields hidden");
        Some(FieldChange::Reset)
    }

    /// Replace every record, e.g. after loading from storage.
    pub fn replace_all(&mut self, records: Vec<FieldRecord>) -> Result<FieldChange> {
        let mut index = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if index.insert(record.id, i).is_some() {
                return Err(FieldOrderError::DuplicateId { id: record.id });
            }
        }

        let mut records = records;
        for projection in Projection::ALL {
            reorder_in_place(&mut records, projection);
        }

        self.records = records;
        self.index = index;
        debug!(fields = self.records.len(), "field set replaced");
        Ok(FieldChange::Replaced)
    }

    fn position(&self, id: FieldId) -> Result<usize> {
        self.index
            .get(&id)
            .copied()
            .ok_or(FieldOrderError::NotFound { id })
    }

    fn max_order(&self, projection: Projection) -> u32 {
        self.records
            .iter()
            .filter(|r| r.is_visible(projection))
            .filter_map(|r| r.order(projection))
            .max()
            .unwrap_or(0)
    }
}
