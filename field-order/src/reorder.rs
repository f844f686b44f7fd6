//! Gap-free order reassignment for a single projection.

use crate::types::{FieldRecord, Projection};

/// Recompute a dense `1..=k` order sequence for `projection`.
///
/// Visible records are ranked by their current order (records without an
/// order rank after all ordered ones), ties broken by id. Hidden records
/// lose their order. The other projection and the record sequence itself
/// are left untouched.
pub fn reorder(records: &[FieldRecord], projection: Projection) -> Vec<FieldRecord> {
    let mut out = records.to_vec();
    reorder_in_place(&mut out, projection);
    out
}

pub(crate) fn reorder_in_place(records: &mut [FieldRecord], projection: Projection) {
    let mut ranked: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.is_visible(projection))
        .map(|(i, _)| i)
        .collect();

    ranked.sort_by_key(|&i| {
        let r = &records[i];
        (r.order(projection).unwrap_or(u32::MAX), r.id)
    });

    for (rank, &i) in ranked.iter().enumerate() {
        records[i].projection_mut(projection).order = Some(rank as u32 + 1);
    }

    for record in records.iter_mut() {
        let state = record.projection_mut(projection);
        if !state.visible {
            state.order = None;
        }
    }
}

/// Whether visible orders in `projection` are exactly `{1..=k}` and hidden
/// records carry no order.
pub fn is_dense(records: &[FieldRecord], projection: Projection) -> bool {
    let mut orders = Vec::new();
    for record in records {
        let state = record.projection(projection);
        match (state.visible, state.order) {
            (true, Some(order)) => orders.push(order),
            (false, None) => {}
            _ => return false,
        }
    }
    orders.sort_unstable();
    orders
        .iter()
        .enumerate()
        .all(|(i, &order)| order == i as u32 + 1)
}
