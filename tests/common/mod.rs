//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use splitcsv::pipeline::{ConfigCollection, ConfigStore, ParsingConfig};
use tempfile::TempDir;

/// Newline rows, comma fields, two columns named `a` and `b`
pub fn two_column_config(name: &str) -> ParsingConfig {
    ParsingConfig::new(name, "\n", ",", columns(&["a", "b"])).unwrap()
}

/// Build a configuration with arbitrary delimiters and headers
pub fn config_with(name: &str, row: &str, col: &str, names: &[&str]) -> ParsingConfig {
    ParsingConfig::new(name, row, col, columns(names)).unwrap()
}

pub fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// A collection holding `count` two-column configurations named `config_1`...
pub fn filled_collection(count: usize) -> ConfigCollection {
    let configs = (1..=count)
        .map(|i| two_column_config(&format!("config_{}", i)))
        .collect();
    ConfigCollection::from_configs(configs).unwrap()
}

/// A store pointing at `configs.json` inside a fresh temporary directory
pub fn temp_store() -> (TempDir, ConfigStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = ConfigStore::new(temp_dir.path().join("configs.json"));
    (temp_dir, store)
}

/// All CSV files directly inside `dir`, sorted by name
pub fn csv_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("csv"))
        .collect();
    files.sort();
    files
}

/// Read a file and normalize line endings
pub fn read_text(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap()
        .replace("\r\n", "\n")
}

/// Assert that a file name looks like `{prefix}_YYYYMMDD_HHMMSS[_n].csv`
pub fn assert_export_name(path: &Path, prefix: &str) {
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    let rest = name
        .strip_prefix(&format!("{}_", prefix))
        .unwrap_or_else(|| panic!("'{}' should start with '{}_'", name, prefix));
    let stem = rest.strip_suffix(".csv").expect("export should end in .csv");
    let timestamp: String = stem.chars().take(15).collect();

    assert_eq!(timestamp.len(), 15, "timestamp too short in '{}'", name);
    assert_eq!(&timestamp[8..9], "_", "timestamp separator missing in '{}'", name);
    assert!(
        timestamp[..8].chars().all(|c| c.is_ascii_digit())
            && timestamp[9..].chars().all(|c| c.is_ascii_digit()),
        "timestamp should be YYYYMMDD_HHMMSS in '{}'",
        name
    );
}
