//! One-shot conversion of a text file or standard input

use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use crate::pipeline::{export, parse, ConfigStore, SessionReport};
use crate::report::ExportSummary;
use crate::utils::{create_spinner, finish_with_success, finish_with_warning};

/// Parse `input` (or all of standard input) with the stored configuration
/// `config_name` and export a single CSV file.
///
/// # Arguments
/// * `store` - Where saved configurations live
/// * `config_name` - Name of the configuration to apply
/// * `input` - Text file to read. `None` reads standard input to the end
/// * `output_dir` - Directory receiving the CSV file
pub fn run_convert(
    store: &ConfigStore,
    config_name: &str,
    input: Option<&Path>,
    output_dir: &Path,
) -> Result<SessionReport> {
    let collection = store.load()?;
    let config = collection.get(config_name).with_context(|| {
        format!(
            "No configuration named '{}'. Available: {:?}",
            config_name,
            collection.names()
        )
    })?;

    let raw = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read standard input")?;
            buf
        }
    };

    println!(
        "\n {} Converting with configuration {}",
        style("◆").cyan().bold(),
        style(&config.name).cyan()
    );
    if let Some(path) = input {
        println!("   Input:  {}", style(path.display()).dim());
    }
    println!("   Output: {}", style(output_dir.display()).dim());
    println!();

    let table = parse(strip_final_newline(&raw), config);

    let spinner = create_spinner("Writing CSV...");
    let artifact = export(&table, &config.name, output_dir)?;
    if table.rejected.is_empty() {
        finish_with_success(&spinner, "CSV written");
    } else {
        finish_with_warning(
            &spinner,
            &format!("CSV written, {} row(s) rejected", table.rejected_count()),
        );
    }

    let report = SessionReport {
        artifact,
        accepted: table.accepted_count(),
        rejected: table.rejected,
    };
    ExportSummary::new(&config.name, &report).display();

    println!();
    println!(" {} Conversion complete!", style("✓").green().bold());

    Ok(report)
}

/// Drop the single line terminator text files conventionally end with
fn strip_final_newline(raw: &str) -> &str {
    raw.strip_suffix("\r\n")
        .or_else(|| raw.strip_suffix('\n'))
        .unwrap_or(raw)
}
