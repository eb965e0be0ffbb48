//! splitcsv: Delimited Text to CSV CLI Tool
//!
//! An interactive tool that splits pasted text into rows and columns using
//! saved parsing configurations and exports each batch as a CSV file.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use splitcsv::cli::{run_convert, run_menu, Cli, Commands};
use splitcsv::pipeline::{list_configs, ConfigStore};
use splitcsv::report::config_table;
use splitcsv::utils::{print_banner, print_goodbye, print_info};

fn main() -> Result<()> {
    // Diagnostics go to stderr; level is overridden by `RUST_LOG`
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = ConfigStore::new(&cli.config_file);

    // Handle subcommands
    if let Some(command) = &cli.command {
        return match command {
            Commands::List => show_configs(&store),
            Commands::Convert { config, input } => {
                run_convert(&store, config, input.as_deref(), &cli.output_dir).map(|_| ())
            }
        };
    }

    print_banner(env!("CARGO_PKG_VERSION"));

    // A corrupt store is fatal: never run with a half-loaded collection
    let collection = store
        .load()
        .with_context(|| format!("Cannot start with configuration file {}", store.path().display()))?;

    run_menu(&store, collection, &cli.output_dir)?;

    print_goodbye();
    Ok(())
}

fn show_configs(store: &ConfigStore) -> Result<()> {
    let collection = store.load()?;
    let configs = list_configs(&collection);
    if configs.is_empty() {
        print_info("No saved configurations.");
        return Ok(());
    }

    println!(
        "\n {} Saved configurations in {}",
        style("◆").cyan().bold(),
        style(store.path().display()).dim()
    );
    for line in config_table(&configs).to_string().lines() {
        println!("   {}", line);
    }
    Ok(())
}
