//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::{DEFAULT_CONFIG_FILE, DEFAULT_OUTPUT_DIR};

/// splitcsv - Turn delimiter-separated text into CSV files using saved parsing configurations
#[derive(Parser, Debug)]
#[command(name = "splitcsv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// JSON file holding the saved parsing configurations.
    /// Created on first save if it does not exist.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: PathBuf,

    /// Directory that receives exported CSV files.
    /// Created on first export if it does not exist.
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the saved parsing configurations
    List,

    /// Parse a file (or standard input) with a saved configuration and export it as CSV
    Convert {
        /// Name of the saved configuration to use
        #[arg(short, long)]
        config: String,

        /// Text file to parse. Reads standard input when omitted.
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}
