//! Core record types for the field ordering engine.
//!
//! All types serialize to/from YAML and JSON via serde using the camelCase
//! keys the field configuration table has always used (`fieldName`,
//! `collapsedHeader`, `samplePane`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FieldOrderError;

/// Stable identifier of a field record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(pub u32);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for FieldId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl FromStr for FieldId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// One of the two independent visibility/order dimensions of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Projection {
    CollapsedHeader,
    SamplePane,
}

impl Projection {
    /// Both projections, header first.
    pub const ALL: [Projection; 2] = [Projection::CollapsedHeader, Projection::SamplePane];

    /// The camelCase key used in serialized records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Projection::CollapsedHeader => "collapsedHeader",
            Projection::SamplePane => "samplePane",
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Projection {
    type Err = FieldOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "collapsedHeader" | "collapsed-header" | "collapsed_header" | "header" => {
                Ok(Projection::CollapsedHeader)
            }
            "samplePane" | "sample-pane" | "sample_pane" | "pane" => Ok(Projection::SamplePane),
            other => Err(FieldOrderError::InvalidProjection(other.to_string())),
        }
    }
}

/// Visibility and position of a field within one projection.
///
/// `order` is only meaningful while `visible` is true.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionState {
    #[serde(default)]
    pub visible: bool,
    #[serde(default)]
    pub order: Option<u32>,
}

impl ProjectionState {
    /// Hidden, no order.
    pub fn hidden() -> Self {
        Self::default()
    }

    /// Visible at the given position.
    pub fn at(order: u32) -> Self {
        Self {
            visible: true,
            order: Some(order),
        }
    }
}

/// A configurable field: identity, display label and both projections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRecord {
    pub id: FieldId,
    pub field_name: String,
    #[serde(default)]
    pub collapsed_header: ProjectionState,
    #[serde(default)]
    pub sample_pane: ProjectionState,
}

impl FieldRecord {
    /// A record hidden in both projections.
    pub fn new(id: impl Into<FieldId>, field_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field_name: field_name.into(),
            collapsed_header: ProjectionState::hidden(),
            sample_pane: ProjectionState::hidden(),
        }
    }

    /// Set the state of one projection, builder style.
    pub fn with(mut self, projection: Projection, state: ProjectionState) -> Self {
        *self.projection_mut(projection) = state;
        self
    }

    pub fn projection(&self, projection: Projection) -> &ProjectionState {
        match projection {
            Projection::CollapsedHeader => &self.collapsed_header,
            Projection::SamplePane => &self.sample_pane,
        }
    }

    pub fn projection_mut(&mut self, projection: Projection) -> &mut ProjectionState {
        match projection {
            Projection::CollapsedHeader => &mut self.collapsed_header,
            Projection::SamplePane => &mut self.sample_pane,
        }
    }

    pub fn is_visible(&self, projection: Projection) -> bool {
        self.projection(projection).visible
    }

    pub fn order(&self, projection: Projection) -> Option<u32> {
        self.projection(projection).order
    }
}
