//! JSON persistence for parsing configurations
//!
//! The document is a JSON object mapping each configuration name to its
//! configuration. Document order is display order. Saves go through a
//! temporary sibling file that is renamed over the target, so a crash
//! mid-write leaves the previous document intact.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tracing::{debug, info};

use super::config::{ConfigCollection, ParsingConfig, MAX_CONFIGS};
use crate::error::{Result, SplitError};

/// Default location of the configuration document
pub const DEFAULT_CONFIG_FILE: &str = "configs.json";

/// Loads and saves a [`ConfigCollection`] at a fixed path
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored configurations.
    ///
    /// A missing document is an empty collection. A document that is not
    /// valid JSON, has the wrong shape, or breaks a configuration invariant
    /// is reported as [`SplitError::StorageCorrupt`].
    pub fn load(&self) -> Result<ConfigCollection> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no configuration file, starting empty");
                return Ok(ConfigCollection::new());
            }
            Err(e) => {
                return Err(SplitError::io(
                    format!("Failed to read {}", self.path.display()),
                    e,
                ))
            }
        };

        let document: StoredDocument =
            serde_json::from_str(&contents).map_err(|e| self.corrupt(e.to_string()))?;

        if document.0.len() > MAX_CONFIGS {
            return Err(self.corrupt(format!(
                "{} configurations stored, at most {} are allowed",
                document.0.len(),
                MAX_CONFIGS
            )));
        }

        let mut configs = Vec::with_capacity(document.0.len());
        for (key, config) in document.0 {
            if key != config.name {
                return Err(self.corrupt(format!(
                    "entry '{}' holds a configuration named '{}'",
                    key, config.name
                )));
            }
            configs.push(config);
        }

        let collection =
            ConfigCollection::from_configs(configs).map_err(|e| self.corrupt(e.to_string()))?;

        info!(
            path = %self.path.display(),
            count = collection.len(),
            "loaded configurations"
        );
        Ok(collection)
    }

    /// Overwrite the document with `collection`.
    pub fn save(&self, collection: &ConfigCollection) -> Result<()> {
        let json = serde_json::to_string_pretty(collection).map_err(|e| {
            SplitError::io("Failed to serialize configurations", io::Error::other(e))
        })?;

        write_atomically(&self.path, json.as_bytes())?;

        info!(
            path = %self.path.display(),
            count = collection.len(),
            "saved configurations"
        );
        Ok(())
    }

    /// Add `config` and persist. On any failure `collection` is still the
    /// current state.
    pub fn add(
        &self,
        collection: &ConfigCollection,
        config: ParsingConfig,
    ) -> Result<ConfigCollection> {
        let updated = collection.with_config(config)?;
        self.save(&updated)?;
        Ok(updated)
    }

    /// Remove the configuration `name` and persist. Nothing is written when
    /// the name is unknown.
    pub fn remove(&self, collection: &ConfigCollection, name: &str) -> Result<ConfigCollection> {
        let updated = collection.without(name)?;
        self.save(&updated)?;
        Ok(updated)
    }

    fn corrupt(&self, reason: String) -> SplitError {
        SplitError::StorageCorrupt {
            path: self.path.clone(),
            reason,
        }
    }
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            SplitError::io(format!("Failed to create directory {}", parent.display()), e)
        })?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());
    let tmp_path = path.with_file_name(format!(".{}.tmp", file_name));

    {
        let mut file = fs::File::create(&tmp_path).map_err(|e| {
            SplitError::io(
                format!("Failed to create temp file {}", tmp_path.display()),
                e,
            )
        })?;
        file.write_all(bytes).map_err(|e| {
            SplitError::io(format!("Failed to write temp file {}", tmp_path.display()), e)
        })?;
        file.sync_all().map_err(|e| {
            SplitError::io(format!("Failed to flush temp file {}", tmp_path.display()), e)
        })?;
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        SplitError::io(
            format!(
                "Failed to rename temp file {} to {}",
                tmp_path.display(),
                path.display()
            ),
            e,
        )
    })
}

/// On-disk shape: name → configuration, with document order kept.
struct StoredDocument(Vec<(String, ParsingConfig)>);

impl<'de> Deserialize<'de> for StoredDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct DocumentVisitor;

        impl<'de> Visitor<'de> for DocumentVisitor {
            type Value = StoredDocument;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping configuration names to configurations")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, ParsingConfig)> = Vec::new();
                while let Some((key, config)) = access.next_entry::<String, ParsingConfig>()? {
                    if entries.iter().any(|(existing, _)| *existing == key) {
                        return Err(serde::de::Error::custom(format!(
                            "configuration '{}' appears more than once",
                            key
                        )));
                    }
                    entries.push((key, config));
                }
                Ok(StoredDocument(entries))
            }
        }

        deserializer.deserialize_map(DocumentVisitor)
    }
}
