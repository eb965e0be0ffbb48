//! Error types for configuration management and CSV export.
//!
//! Row-level mismatches are not errors: they are collected as
//! [`RejectedRow`](crate::pipeline::RejectedRow) records on the parsed table
//! and never abort a batch.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the configuration store, exporter, and session.
#[derive(Debug, Error)]
pub enum SplitError {
    /// The configuration document exists but cannot be trusted.
    ///
    /// The process should not continue with a half-loaded store.
    #[error("configuration file {} is corrupt: {reason}", path.display())]
    StorageCorrupt {
        /// Location of the offending document
        path: PathBuf,
        /// What failed to parse or validate
        reason: String,
    },

    /// A configuration with this name is already stored.
    #[error("a configuration named '{0}' already exists")]
    DuplicateName(String),

    /// No stored configuration has this name.
    #[error("no configuration named '{0}'")]
    NotFound(String),

    /// The store already holds the maximum number of configurations.
    #[error("there are already {max} configurations, delete one before creating another")]
    CapacityExceeded {
        /// Maximum number of stored configurations
        max: usize,
    },

    /// A listing position outside `1..=available`.
    #[error("{index} is not a valid choice, pick a number between 1 and {available}")]
    InvalidSelection { index: usize, available: usize },

    /// A configuration violates one of its invariants.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Filesystem failure while writing the store or an export.
    #[error("{context}: {source}")]
    Io {
        /// What was being attempted
        context: String,
        #[source]
        source: io::Error,
    },
}

impl SplitError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        SplitError::Io {
            context: context.into(),
            source,
        }
    }

    /// Configuration management errors the menu can report and move past.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, SplitError::StorageCorrupt { .. })
    }
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, SplitError>;
