//! Entry points the console layer calls into
//!
//! Each mutating action takes the current collection and returns the new one;
//! the caller replaces its value only on success.

use std::path::Path;

use super::config::{ConfigCollection, ParsingConfig};
use super::session::{Session, SessionEvent};
use super::store::ConfigStore;
use crate::error::{Result, SplitError};

/// Configurations in display order
pub fn list_configs(collection: &ConfigCollection) -> Vec<&ParsingConfig> {
    collection.iter().collect()
}

/// Validate, add, and persist a new configuration.
pub fn create_config(
    store: &ConfigStore,
    collection: &ConfigCollection,
    name: &str,
    row_delimiter: &str,
    col_delimiter: &str,
    column_names: Vec<String>,
) -> Result<ConfigCollection> {
    let config = ParsingConfig::new(name, row_delimiter, col_delimiter, column_names)?;
    store.add(collection, config)
}

/// Pick a configuration by its one-based position in the listing.
pub fn select_config(collection: &ConfigCollection, index: usize) -> Result<&ParsingConfig> {
    index
        .checked_sub(1)
        .and_then(|i| collection.get_index(i))
        .ok_or(SplitError::InvalidSelection {
            index,
            available: collection.len(),
        })
}

/// Remove and persist. Unknown names leave the stored document untouched.
pub fn delete_config(
    store: &ConfigStore,
    collection: &ConfigCollection,
    name: &str,
) -> Result<ConfigCollection> {
    store.remove(collection, name)
}

/// Start a parse and export session for `config`.
pub fn run_session(config: &ParsingConfig, output_dir: &Path) -> Session {
    Session::new(config.clone(), output_dir)
}

/// Deliver one input line to a running session.
pub fn feed_line(session: &mut Session, line: &str) -> SessionEvent {
    session.feed_line(line)
}
