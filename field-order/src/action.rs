//! Serializable mutation requests.
//!
//! Actions are what a presentation layer or a script sends to the store.
//! They serialize as a tagged map, e.g.
//!
//! ```yaml
//! - action: set-visibility
//!   id: 3
//!   projection: collapsedHeader
//!   visible: true
//! - action: set-order
//!   id: 3
//!   projection: collapsedHeader
//!   order: 1
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::set::{FieldChange, FieldSet};
use crate::types::{FieldId, Projection};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum FieldAction {
    SetVisibility {
        id: FieldId,
        projection: Projection,
        visible: bool,
    },
    SetOrder {
        id: FieldId,
        projection: Projection,
        #[serde(default)]
        order: Option<u32>,
    },
}

impl FieldAction {
    pub fn show(id: impl Into<FieldId>, projection: Projection) -> Self {
        Self::SetVisibility {
            id: id.into(),
            projection,
            visible: true,
        }
    }

    pub fn hide(id: impl Into<FieldId>, projection: Projection) -> Self {
        Self::SetVisibility {
            id: id.into(),
            projection,
            visible: false,
        }
    }

    pub fn move_to(id: impl Into<FieldId>, projection: Projection, order: u32) -> Self {
        Self::SetOrder {
            id: id.into(),
            projection,
            order: Some(order),
        }
    }

    /// Apply this action to a field set.
    pub fn apply_to(&self, set: &mut FieldSet) -> Result<Option<FieldChange>> {
        match *self {
            FieldAction::SetVisibility {
                id,
                projection,
                visible,
            } => set.set_visibility(id, projection, visible),
            FieldAction::SetOrder {
                id,
                projection,
                order,
            } => set.set_order(id, projection, order),
        }
    }
}

/// Parse a YAML list of actions.
pub fn parse_actions(yaml: &str) -> Result<Vec<FieldAction>> {
    Ok(serde_yaml_ng::from_str(yaml)?)
}
