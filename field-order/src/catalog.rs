//! Static catalog of configurable fields used to seed a store.

use serde::{Deserialize, Serialize};

use crate::types::{FieldId, FieldRecord};

/// A catalog entry: just identity and label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: FieldId,
    pub name: String,
}

/// The seed list of fields. Every seeded record starts hidden in both
/// projections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldCatalog {
    entries: Vec<CatalogEntry>,
}

impl FieldCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Field 1` .. `Field n` with ids `1..=n`.
    pub fn numbered(n: u32) -> Self {
        (1..=n).fold(Self::new(), |catalog, i| {
            catalog.field(i, format!("Field {i}"))
        })
    }

    /// Add a field.
    pub fn field(mut self, id: impl Into<FieldId>, name: impl Into<String>) -> Self {
        self.entries.push(CatalogEntry {
            id: id.into(),
            name: name.into(),
        });
        self
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fresh, all-hidden records for every entry.
    pub fn records(&self) -> Vec<FieldRecord> {
        self.entries
            .iter()
            .map(|e| FieldRecord::new(e.id, e.name.clone()))
            .collect()
    }
}

/// The ten-field catalog the configuration table ships with.
pub fn default_catalog() -> FieldCatalog {
    FieldCatalog::numbered(10)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Projection;

    #[test]
    fn test_default_catalog() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.entries()[0].name, "Field 1");
        assert_eq!(catalog.entries()[9].id, FieldId(10));
    }

    #[test]
    fn test_records_start_hidden() {
        let records = FieldCatalog::new().field(7, "Status").records();
        assert_eq!(records.len(), 1);
        for projection in Projection::ALL {
            assert!(!records[0].is_visible(projection));
            assert_eq!(records[0].order(projection), None);
        }
    }

    #[test]
    fn test_catalog_deserializes_as_list() {
        let catalog: FieldCatalog =
            serde_yaml_ng::from_str("- id: 1\n  name: Title\n- id: 2\n  name: Owner\n").unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entries()[1].name, "Owner");
    }
}
