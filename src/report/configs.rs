//! Tabular listing of stored configurations

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};

use crate::pipeline::{escape_delimiter, ConfigCollection, ParsingConfig, MAX_CONFIGS};

/// Build a numbered table of configurations, numbered in the order given
pub fn config_table(configs: &[&ParsingConfig]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Name").add_attribute(Attribute::Bold),
        Cell::new("Row delimiter").add_attribute(Attribute::Bold),
        Cell::new("Column delimiter").add_attribute(Attribute::Bold),
        Cell::new("Columns").add_attribute(Attribute::Bold),
    ]);

    for (i, config) in configs.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1).fg(Color::Cyan),
            Cell::new(&config.name).add_attribute(Attribute::Bold),
            Cell::new(format!("\"{}\"", escape_delimiter(&config.row_delimiter))),
            Cell::new(format!("\"{}\"", escape_delimiter(&config.col_delimiter))),
            Cell::new(config.column_names.join(", ")),
        ]);
    }

    table
}

/// "2/4 configurations" style usage line
pub fn capacity_label(collection: &ConfigCollection) -> String {
    format!("{}/{} configurations", collection.len(), MAX_CONFIGS)
}
