//! Terminal styling utilities for the interactive console

use console::{style, Emoji};

use crate::pipeline::{escape_delimiter, ParsingConfig};

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static SCISSORS: Emoji<'_, '_> = Emoji("✂️  ", "");
pub static COLUMNS: Emoji<'_, '_> = Emoji("📊 ", "");
pub static ROWS: Emoji<'_, '_> = Emoji("📄 ", "");

/// Print the application banner with ASCII art
pub fn print_banner(version: &str) {
    let banner = r#"
     ____        _ _ _    ____ ______     __
    / ___| _ __ | (_) |_ / ___/ ___\ \   / /
    \___ \| '_ \| | | __| |   \___ \\ \ / /
     ___) | |_) | | | |_| |___ ___) |\ V /
    |____/| .__/|_|_|\__|\____|____/  \_/
          |_|
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {} {}",
        style("⇶").magenta().bold(),
        style("Delimited text to CSV, one paste at a time").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print a configuration card
pub fn print_config(config: &ParsingConfig) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {:<width$}│",
        style(format!("⚙️  {}", truncate_string(&config.name, 40))).cyan().bold(),
        width = box_width - 3
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {}Row delimiter:    {:<30}│",
        ROWS,
        truncate_string(&quoted(&config.row_delimiter), 30)
    );
    println!(
        "    │  {}Column delimiter: {:<30}│",
        SCISSORS,
        truncate_string(&quoted(&config.col_delimiter), 30)
    );
    println!(
        "    │  {}Columns ({}):      {:<29}│",
        COLUMNS,
        config.num_columns,
        truncate_string(&config.column_names.join(", "), 29)
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a section header with styling
pub fn print_section_header(title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style("◆").cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a recoverable problem
pub fn print_warning(message: &str) {
    println!("    {} {}", WARN, style(message).yellow());
}

/// Print the farewell message
pub fn print_goodbye() {
    println!();
    println!("    {} {}", ROCKET, style("Goodbye!").green().bold());
    println!();
}

// Helper functions

fn quoted(delimiter: &str) -> String {
    format!("\"{}\"", escape_delimiter(delimiter))
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let tail: String = s
            .chars()
            .skip(s.chars().count() - (max_len - 3))
            .collect();
        format!("...{}", tail)
    }
}
