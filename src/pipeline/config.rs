//! Parsing configurations and the bounded collection that holds them

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Result, SplitError};

/// Maximum number of configurations that can be saved at once
pub const MAX_CONFIGS: usize = 4;

/// Characters that cannot appear in a configuration name, since the name
/// becomes part of every export filename.
const FORBIDDEN_NAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// A named specification of how to split a text blob into a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsingConfig {
    /// Unique identifier, also used as the export filename prefix
    pub name: String,
    /// Substring separating records
    pub row_delimiter: String,
    /// Substring separating fields within a record
    pub col_delimiter: String,
    /// Expected number of fields per record
    pub num_columns: usize,
    /// Header names, one per column
    pub column_names: Vec<String>,
}

impl ParsingConfig {
    /// Build a configuration for a new entry, applying the creation rules
    /// of [`validate_new`](Self::validate_new). The column count is taken
    /// from `column_names`.
    pub fn new(
        name: impl Into<String>,
        row_delimiter: impl Into<String>,
        col_delimiter: impl Into<String>,
        column_names: Vec<String>,
    ) -> Result<Self> {
        let config = Self {
            name: name.into(),
            row_delimiter: row_delimiter.into(),
            col_delimiter: col_delimiter.into(),
            num_columns: column_names.len(),
            column_names,
        };
        config.validate_new()?;
        Ok(config)
    }

    /// Check the invariants every stored configuration must satisfy.
    ///
    /// This is what loading enforces, so it must never reject a document an
    /// earlier release could have written.
    pub fn validate(&self) -> Result<()> {
        if self.row_delimiter.is_empty() {
            return Err(SplitError::InvalidConfig(
                "row delimiter must not be empty".to_string(),
            ));
        }
        if self.col_delimiter.is_empty() {
            return Err(SplitError::InvalidConfig(
                "column delimiter must not be empty".to_string(),
            ));
        }
        if self.num_columns == 0 {
            return Err(SplitError::InvalidConfig(
                "number of columns must be at least 1".to_string(),
            ));
        }
        if self.column_names.len() != self.num_columns {
            return Err(SplitError::InvalidConfig(format!(
                "'{}' declares {} columns but names {}",
                self.name,
                self.num_columns,
                self.column_names.len()
            )));
        }

        Ok(())
    }

    /// Stricter checks for configurations being created: the name must be
    /// usable in a file name and column names must be distinct.
    pub fn validate_new(&self) -> Result<()> {
        validate_name(&self.name).map_err(SplitError::InvalidConfig)?;
        self.validate()?;

        for (i, column) in self.column_names.iter().enumerate() {
            if self.column_names[..i].contains(column) {
                return Err(SplitError::InvalidConfig(format!(
                    "column name '{}' is used more than once",
                    column
                )));
            }
        }

        Ok(())
    }
}

/// True for characters that cannot appear in a file name on common platforms
pub fn is_forbidden_name_char(c: char) -> bool {
    FORBIDDEN_NAME_CHARS.contains(&c) || c.is_control()
}

/// Validate a configuration name, returning a human-readable reason on failure.
pub fn validate_name(name: &str) -> std::result::Result<(), String> {
    if name.trim().is_empty() {
        return Err("configuration name must not be empty".to_string());
    }
    if let Some(c) = name.chars().find(|&c| is_forbidden_name_char(c)) {
        return Err(format!(
            "configuration name '{}' contains the character {:?}, which cannot be used in a file name",
            name, c
        ));
    }
    Ok(())
}

/// Interpret the escape sequences `\n`, `\r`, `\t` and `\\` in a delimiter
/// typed at a prompt. Unknown escapes are kept verbatim.
pub fn unescape_delimiter(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

/// Render a delimiter for display, the inverse of [`unescape_delimiter`].
pub fn escape_delimiter(delimiter: &str) -> String {
    delimiter
        .replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Ordered collection of at most [`MAX_CONFIGS`] uniquely named configurations.
///
/// Mutations return a new collection and leave `self` untouched, so a failed
/// save never leaves the caller holding unsaved state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigCollection {
    entries: Vec<ParsingConfig>,
}

impl ConfigCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from configurations in display order, enforcing
    /// the collection invariants and [`ParsingConfig::validate`].
    pub fn from_configs(configs: Vec<ParsingConfig>) -> Result<Self> {
        let mut collection = Self::new();
        for config in configs {
            collection = collection.with_config(config)?;
        }
        Ok(collection)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when no further configuration can be added
    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_CONFIGS
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParsingConfig> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&ParsingConfig> {
        self.entries.iter().find(|c| c.name == name)
    }

    /// Configuration at a zero-based display position
    pub fn get_index(&self, index: usize) -> Option<&ParsingConfig> {
        self.entries.get(index)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Return a copy of this collection with `config` appended.
    pub fn with_config(&self, config: ParsingConfig) -> Result<Self> {
        if self.is_full() {
            return Err(SplitError::CapacityExceeded { max: MAX_CONFIGS });
        }
        if self.contains(&config.name) {
            return Err(SplitError::DuplicateName(config.name));
        }
        config.validate()?;

        let mut entries = self.entries.clone();
        entries.push(config);
        Ok(Self { entries })
    }

    /// Return a copy of this collection without the configuration `name`.
    pub fn without(&self, name: &str) -> Result<Self> {
        if !self.contains(name) {
            return Err(SplitError::NotFound(name.to_string()));
        }
        let entries = self
            .entries
            .iter()
            .filter(|c| c.name != name)
            .cloned()
            .collect();
        Ok(Self { entries })
    }
}

impl Serialize for ConfigCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for config in &self.entries {
            map.serialize_entry(&config.name, config)?;
        }
        map.end()
    }
}
