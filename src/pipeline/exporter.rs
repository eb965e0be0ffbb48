//! CSV export of parsed tables
//!
//! Each export creates a new file named `{config}_{YYYYMMDD_HHMMSS}.csv` in
//! the output directory. When that name is already taken (two exports in the
//! same second) a counter is appended: `{config}_{timestamp}_1.csv`, and so on.
//! Existing files are never overwritten.
//!
//! Fields are quoted only when they contain the separator, a quote, or a line
//! break. Empty fields are written as nothing at all, except in a one-column
//! table where a bare empty line would read back as no record; there the
//! field is written as `""`.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use polars::prelude::*;
use tracing::info;

use super::config::is_forbidden_name_char;
use super::parser::ParsedTable;
use crate::error::{Result, SplitError};

/// Default directory for exported CSV files
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Timestamp layout used in export filenames
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

const SEPARATOR: char = ',';

/// A CSV file written by [`export`]
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub path: PathBuf,
    /// Data rows written, excluding the header
    pub rows_written: usize,
    pub created_at: DateTime<Local>,
}

/// Write `table` as CSV into `output_dir`, stamped with the current time.
pub fn export(table: &ParsedTable, config_name: &str, output_dir: &Path) -> Result<ExportArtifact> {
    export_at(table, config_name, output_dir, Local::now())
}

/// Write `table` as CSV into `output_dir`, stamped with `timestamp`.
pub fn export_at(
    table: &ParsedTable,
    config_name: &str,
    output_dir: &Path,
    timestamp: DateTime<Local>,
) -> Result<ExportArtifact> {
    fs::create_dir_all(output_dir).map_err(|e| {
        SplitError::io(
            format!("Failed to create output directory {}", output_dir.display()),
            e,
        )
    })?;

    let stem = format!(
        "{}_{}",
        file_stem(config_name),
        timestamp.format(TIMESTAMP_FORMAT)
    );
    let (path, mut file) = create_unique(output_dir, &stem)?;
    let write_error = |e: io::Error| {
        SplitError::io(format!("Failed to write CSV file {}", path.display()), e)
    };

    let mut df = to_dataframe(table).map_err(|e| {
        SplitError::io(
            format!("Failed to build table for {}", path.display()),
            io::Error::other(e),
        )
    })?;

    // Frame columns carry positional names; the configured headers may repeat
    file.write_all(header_line(&table.column_names).as_bytes())
        .map_err(write_error)?;

    CsvWriter::new(&mut file)
        .include_header(false)
        .finish(&mut df)
        .map_err(|e| write_error(io::Error::other(e)))?;

    info!(
        path = %path.display(),
        rows = table.accepted_count(),
        rejected = table.rejected_count(),
        "exported table"
    );

    Ok(ExportArtifact {
        path,
        rows_written: table.accepted_count(),
        created_at: timestamp,
    })
}

/// Path an export with this stem and collision counter would use
fn candidate_path(output_dir: &Path, stem: &str, attempt: usize) -> PathBuf {
    if attempt == 0 {
        output_dir.join(format!("{}.csv", stem))
    } else {
        output_dir.join(format!("{}_{}.csv", stem, attempt))
    }
}

fn create_unique(output_dir: &Path, stem: &str) -> Result<(PathBuf, File)> {
    let mut attempt = 0;
    loop {
        let path = candidate_path(output_dir, stem, attempt);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => {
                return Err(SplitError::io(
                    format!("Failed to create output file {}", path.display()),
                    e,
                ))
            }
        }
    }
}

/// Configuration name with characters that cannot appear in a file name
/// replaced by `_`
fn file_stem(config_name: &str) -> String {
    config_name
        .chars()
        .map(|c| if is_forbidden_name_char(c) { '_' } else { c })
        .collect()
}

/// Quote a field when it contains the separator, a quote, or a line break
fn quote_field(field: &str) -> String {
    if field.contains([SEPARATOR, '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// The header record, terminated by `\n`
fn header_line(column_names: &[String]) -> String {
    let mut line = match column_names {
        [only] if only.is_empty() => "\"\"".to_string(),
        _ => column_names
            .iter()
            .map(|name| quote_field(name))
            .collect::<Vec<_>>()
            .join(&SEPARATOR.to_string()),
    };
    line.push('\n');
    line
}

/// Lay the accepted rows out as one string column per configured header.
///
/// Columns are named by position. Empty and missing fields become nulls,
/// which the writer renders as nothing.
fn to_dataframe(table: &ParsedTable) -> PolarsResult<DataFrame> {
    let keep_empty = table.column_names.len() == 1;
    let columns: Vec<Column> = (0..table.column_names.len())
        .map(|j| {
            let values: Vec<Option<&str>> = table
                .rows
                .iter()
                .map(|row| {
                    row.get(j)
                        .map(String::as_str)
                        .filter(|value| keep_empty || !value.is_empty())
                })
                .collect();
            Column::new(format!("column_{}", j).into(), values)
        })
        .collect();

    DataFrame::new(columns)
}
