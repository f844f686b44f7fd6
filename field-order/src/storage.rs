//! Storage implementations for field configurations

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;
use ulid::Ulid;

use crate::error::{FieldOrderError, Result};
use crate::types::FieldRecord;

/// Storage abstraction for the full field record list.
///
/// Loads replace state wholesale and saves write the whole list, so there
/// are no partial-write semantics to honor.
#[async_trait]
pub trait FieldConfigStorage: Send + Sync {
    /// Load every record
    async fn load(&self) -> Result<Vec<FieldRecord>>;

    /// Persist every record
    async fn save(&self, records: &[FieldRecord]) -> Result<()>;
}

/// Process-local storage, useful for tests and as a stand-in backend.
#[derive(Debug, Default)]
pub struct InMemoryFieldStorage {
    records: Mutex<Option<Vec<FieldRecord>>>,
}

impl InMemoryFieldStorage {
    /// Empty storage; `load` fails until something is saved.
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds `records`.
    pub fn with_records(records: Vec<FieldRecord>) -> Self {
        Self {
            records: Mutex::new(Some(records)),
        }
    }
}

#[async_trait]
impl FieldConfigStorage for InMemoryFieldStorage {
    async fn load(&self) -> Result<Vec<FieldRecord>> {
        self.records
            .lock()
            .await
            .clone()
            .ok_or_else(|| FieldOrderError::StorageNotInitialized {
                path: PathBuf::from("<memory>"),
            })
    }

    async fn save(&self, records: &[FieldRecord]) -> Result<()> {
        *self.records.lock().await = Some(records.to_vec());
        Ok(())
    }
}

/// On-disk document layout.
#[derive(Debug, Serialize, Deserialize)]
struct FieldsDocument {
    fields: Vec<FieldRecord>,
}

/// YAML file storage: one document with a `fields:` list.
#[derive(Debug)]
pub struct YamlFieldStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl YamlFieldStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FieldConfigStorage for YamlFieldStorage {
    async fn load(&self) -> Result<Vec<FieldRecord>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(FieldOrderError::StorageNotInitialized {
                    path: self.path.clone(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        let doc: FieldsDocument = serde_yaml_ng::from_str(&content)?;
        debug!(path = %self.path.display(), fields = doc.fields.len(), "loaded field config");
        Ok(doc.fields)
    }

    async fn save(&self, records: &[FieldRecord]) -> Result<()> {
        let _lock = self.write_lock.lock().await;
        let yaml = serde_yaml_ng::to_string(&FieldsDocument {
            fields: records.to_vec(),
        })?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).await?;
        }
        atomic_write(&self.path, yaml.as_bytes()).await?;
        debug!(path = %self.path.display(), fields = records.len(), "saved field config");
        Ok(())
    }
}

/// Write to a sibling temp file, then rename over the target.
async fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let tmp = dir.join(format!(".tmp_{}", Ulid::new()));
    fs::write(&tmp, data).await?;
    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldId, Projection, ProjectionState};
    use tempfile::TempDir;

    fn sample() -> Vec<FieldRecord> {
        vec![
            FieldRecord::new(1, "Field 1")
                .with(Projection::CollapsedHeader, ProjectionState::at(1)),
            FieldRecord::new(2, "Field 2").with(Projection::SamplePane, ProjectionState::at(1)),
        ]
    }

    #[tokio::test]
    async fn test_memory_storage_load_before_save_fails() {
        let storage = InMemoryFieldStorage::new();
        let err = storage.load().await.unwrap_err();
        assert!(matches!(err, FieldOrderError::StorageNotInitialized { .. }));
    }

    #[tokio::test]
    async fn test_memory_storage_save_and_load() {
        let storage = InMemoryFieldStorage::new();
        storage.save(&sample()).await.unwrap();
        assert_eq!(storage.load().await.unwrap(), sample());
    }

    #[tokio::test]
    async fn test_yaml_storage_missing_file() {
        let temp = TempDir::new().unwrap();
        let storage = YamlFieldStorage::new(temp.path().join("fields.yaml"));
        let err = storage.load().await.unwrap_err();
        assert!(matches!(err, FieldOrderError::StorageNotInitialized { .. }));
    }

    #[tokio::test]
    async fn test_yaml_storage_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("dir").join("fields.yaml");
        let storage = YamlFieldStorage::new(&path);
        storage.save(&sample()).await.unwrap();
        assert!(path.exists());

        let loaded = storage.load().await.unwrap();
        assert_eq!(loaded, sample());
    }

    #[tokio::test]
    async fn test_yaml_storage_file_format() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("fields.yaml");
        YamlFieldStorage::new(&path).save(&sample()).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("fields:"));
        assert!(content.contains("fieldName: Field 1"));
        assert!(content.contains("collapsedHeader:"));

        // no temp files left behind
        let leftovers: Vec<_> = std::fs::read_dir(temp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(".tmp_"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn test_yaml_storage_reads_hand_written_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("fields.yaml");
        std::fs::write(
            &path,
            "fields:\n  - id: 3\n    fieldName: Owner\n    samplePane:\n      visible: true\n      order: 1\n",
        )
        .unwrap();
        let loaded = YamlFieldStorage::new(&path).load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, FieldId(3));
        assert_eq!(loaded[0].order(Projection::SamplePane), Some(1));
        assert!(!loaded[0].is_visible(Projection::CollapsedHeader));
    }

    #[tokio::test]
    async fn test_yaml_storage_rejects_malformed_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("fields.yaml");
        std::fs::write(&path, "fields: [ {").unwrap();
        let err = YamlFieldStorage::new(&path).load().await.unwrap_err();
        assert!(matches!(err, FieldOrderError::Yaml(_)));
    }
}
