//! Configuration loading using Figment.
//!
//! Sources, later overriding earlier:
//! 1. Built-in defaults
//! 2. A config file: the explicit path if given, otherwise the first of
//!    `field-order.{yaml,yml,toml,json}` found in the working directory
//! 3. Environment variables prefixed `FIELD_ORDER_` (`__` separates nested
//!    keys, e.g. `FIELD_ORDER_STORAGE__PATH`)

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::catalog::{default_catalog, FieldCatalog};
use crate::error::Result;
use crate::storage::YamlFieldStorage;
use crate::store::{FieldStore, DEFAULT_EVENT_CAPACITY};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "FIELD_ORDER_";

/// Base name of auto-discovered config files.
pub const CONFIG_FILE_STEM: &str = "field-order";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// YAML file holding the persisted field records
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".field-order").join("fields.yaml"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldOrderConfig {
    pub storage: StorageConfig,
    /// Broadcast buffer size for store events
    pub event_capacity: usize,
    /// Fields to seed when storage is empty
    pub catalog: FieldCatalog,
}

impl Default for FieldOrderConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
            catalog: default_catalog(),
        }
    }
}

impl FieldOrderConfig {
    /// Load from defaults, the discovered (or given) file and the environment.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::load_from(explicit, &cwd)
    }

    /// Like [`FieldOrderConfig::load`] but discovering files in `dir`.
    pub fn load_from(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        let file = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => discover(dir),
        };
        if let Some(path) = file {
            debug!(path = %path.display(), "loading config file");
            figment = merge_file(figment, &path);
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Self = figment.extract()?;
        trace!(?config, "configuration resolved");
        Ok(config)
    }

    /// A store seeded from the configured catalog.
    pub fn build_store(&self) -> Result<FieldStore> {
        FieldStore::with_capacity(self.catalog.records(), self.event_capacity)
    }

    /// File storage at the configured path.
    pub fn build_storage(&self) -> YamlFieldStorage {
        YamlFieldStorage::new(&self.storage.path)
    }
}

fn discover(dir: &Path) -> Option<PathBuf> {
    ["yaml", "yml", "toml", "json"]
        .iter()
        .map(|ext| dir.join(format!("{CONFIG_FILE_STEM}.{ext}")))
        .find(|path| path.is_file())
}

fn merge_file(figment: Figment, path: &Path) -> Figment {
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => figment.merge(Toml::file(path)),
        Some("json") => figment.merge(Json::file(path)),
        _ => figment.merge(Yaml::file(path)),
    }
}
