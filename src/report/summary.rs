//! Export and session summary display

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{SessionReport, SessionTotals};

/// Maximum characters of a rejected row shown before truncating
const REJECTED_PREVIEW_LEN: usize = 60;

/// Summary of one parse and export cycle
#[derive(Debug)]
pub struct ExportSummary<'a> {
    pub config_name: &'a str,
    pub report: &'a SessionReport,
}

impl<'a> ExportSummary<'a> {
    pub fn new(config_name: &'a str, report: &'a SessionReport) -> Self {
        Self {
            config_name,
            report,
        }
    }

    /// Build the metrics table without printing it
    pub fn table(&self) -> Table {
        let accepted = self.report.accepted;
        let rejected = self.report.rejected.len();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("⚙️  Configuration"),
            Cell::new(self.config_name),
        ]);

        table.add_row(vec![
            Cell::new("✅ Rows exported"),
            Cell::new(accepted)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("🗑️  Rows rejected"),
            Cell::new(rejected).fg(if rejected == 0 {
                Color::White
            } else {
                Color::Red
            }),
        ]);

        table.add_row(vec![
            Cell::new("💾 File"),
            Cell::new(self.report.artifact.path.display()),
        ]);

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("EXPORT SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());

        // Indent the table
        for line in self.table().to_string().lines() {
            println!("    {}", line);
        }

        if !self.report.rejected.is_empty() {
            println!();
            println!(
                "      {} {}:",
                style("Rejected rows (wrong number of columns)").yellow(),
                style(format!("({})", self.report.rejected.len())).dim()
            );
            for row in &self.report.rejected {
                println!(
                    "        {} #{} {} {}",
                    style("•").dim(),
                    row.index + 1,
                    preview(&row.raw, REJECTED_PREVIEW_LEN),
                    style(format!("[{} field(s)]", row.field_count)).dim()
                );
            }
        }
    }
}

/// Print the totals for a finished session
pub fn display_session_totals(config_name: &str, totals: &SessionTotals) {
    println!();
    println!(
        "    {} Session for {} finished: {} export(s), {} row(s) exported, {} rejected{}",
        style("◆").cyan().bold(),
        style(config_name).cyan(),
        style(totals.exports).yellow().bold(),
        style(totals.accepted_rows).green(),
        style(totals.rejected_rows).red(),
        if totals.failures > 0 {
            format!(", {} failed", style(totals.failures).red().bold())
        } else {
            String::new()
        }
    );
}

/// Shorten a raw row for display, keeping it on a single line
fn preview(raw: &str, max_chars: usize) -> String {
    let single_line = raw.replace('\r', "\\r").replace('\n', "\\n");
    if single_line.chars().count() <= max_chars {
        format!("{:?}", single_line)
    } else {
        let head: String = single_line.chars().take(max_chars).collect();
        format!("{:?}...", head)
    }
}
