//! Row parser - splits a text blob into a table using a parsing configuration

use serde::Serialize;
use tracing::debug;

use super::config::ParsingConfig;

/// A candidate row discarded because its field count did not match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    /// Zero-based position among all candidate rows
    pub index: usize,
    /// The row text as it appeared in the input
    pub raw: String,
    /// Number of fields the row split into
    pub field_count: usize,
}

/// Result of applying a configuration to one input blob
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedTable {
    pub column_names: Vec<String>,
    /// Accepted rows in input order, each with exactly `column_names.len()` fields
    pub rows: Vec<Vec<String>>,
    pub rejected: Vec<RejectedRow>,
}

impl ParsedTable {
    /// An empty table with the given headers
    pub fn empty(column_names: Vec<String>) -> Self {
        Self {
            column_names,
            ..Default::default()
        }
    }

    pub fn accepted_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    /// Number of candidate rows the input was split into
    pub fn total_candidates(&self) -> usize {
        self.rows.len() + self.rejected.len()
    }
}

/// Split `raw_text` into rows and fields according to `config`.
///
/// Rows with the wrong number of fields are recorded as rejected and parsing
/// continues. Empty input produces no candidate rows at all.
pub fn parse(raw_text: &str, config: &ParsingConfig) -> ParsedTable {
    let mut table = ParsedTable::empty(config.column_names.clone());

    if raw_text.is_empty() {
        return table;
    }

    for (index, row) in raw_text.split(config.row_delimiter.as_str()).enumerate() {
        let fields: Vec<String> = row
            .split(config.col_delimiter.as_str())
            .map(str::to_string)
            .collect();

        if fields.len() == config.num_columns {
            table.rows.push(fields);
        } else {
            debug!(
                index,
                expected = config.num_columns,
                found = fields.len(),
                row,
                "rejected row with wrong field count"
            );
            table.rejected.push(RejectedRow {
                index,
                raw: row.to_string(),
                field_count: fields.len(),
            });
        }
    }

    table
}
