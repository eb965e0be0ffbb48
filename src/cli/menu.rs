//! Main menu loop
//!
//! Holds the in-memory [`ConfigCollection`] for the lifetime of the process.
//! The collection is replaced only after a mutation has been saved, so a
//! failed save leaves both memory and disk at the previous state.

use std::path::Path;

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Select};

use super::prompts::{confirm_delete, prompt_new_config, select_config_prompt, ConfigChoice};
use super::session::run_interactive_session;
use crate::error::SplitError;
use crate::pipeline::{
    create_config, delete_config, list_configs, select_config, ConfigCollection, ConfigStore,
    ParsingConfig, MAX_CONFIGS,
};
use crate::report::{capacity_label, config_table};
use crate::utils::{print_info, print_section_header, print_success, print_warning};

/// Top-level menu entries, in display order
const MAIN_MENU: [&str; 3] = [
    "Select configuration and process data",
    "Manage configurations",
    "Exit",
];

/// Run the interactive menu until the user exits.
pub fn run_menu(store: &ConfigStore, collection: ConfigCollection, output_dir: &Path) -> Result<()> {
    let mut collection = collection;

    loop {
        print_section_header("Main menu");
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Choose an option")
            .items(&MAIN_MENU)
            .default(0)
            .interact()?;

        match choice {
            0 => process_data(store, &mut collection, output_dir)?,
            1 => manage_configs(store, &mut collection)?,
            _ => return Ok(()),
        }
    }
}

fn process_data(
    store: &ConfigStore,
    collection: &mut ConfigCollection,
    output_dir: &Path,
) -> Result<()> {
    if collection.is_empty() {
        print_info("No saved configurations yet. Create one first.");
        if let Some(config) = create_interactively(store, collection)? {
            run_interactive_session(&config, output_dir)?;
        }
        return Ok(());
    }

    loop {
        show_listing(collection);
        let config = match select_config_prompt(collection, true)? {
            ConfigChoice::Existing(index) => select_config(collection, index)?.clone(),
            ConfigChoice::CreateNew => match create_interactively(store, collection)? {
                Some(config) => config,
                None => continue,
            },
            ConfigChoice::Back => return Ok(()),
        };

        run_interactive_session(&config, output_dir)?;
        return Ok(());
    }
}

fn manage_configs(store: &ConfigStore, collection: &mut ConfigCollection) -> Result<()> {
    if collection.is_empty() {
        print_info("There are no saved configurations.");
        return Ok(());
    }

    show_listing(collection);
    let config = match select_config_prompt(collection, false)? {
        ConfigChoice::Existing(index) => select_config(collection, index)?.clone(),
        ConfigChoice::CreateNew | ConfigChoice::Back => return Ok(()),
    };

    print_section_header(&format!("Configuration: {}", config.name));
    let json = serde_json::to_string_pretty(&config)?;
    for line in json.lines() {
        println!("    {}", line);
    }
    println!();

    if confirm_delete(&config.name)? {
        match delete_config(store, collection, &config.name) {
            Ok(updated) => {
                *collection = updated;
                print_success(&format!("Configuration '{}' deleted", config.name));
            }
            Err(e) => report_recoverable(e)?,
        }
    }

    Ok(())
}

/// Prompt for, save, and return a new configuration. `None` when the store
/// is full or the save was refused.
fn create_interactively(
    store: &ConfigStore,
    collection: &mut ConfigCollection,
) -> Result<Option<ParsingConfig>> {
    if collection.is_full() {
        print_warning(&SplitError::CapacityExceeded { max: MAX_CONFIGS }.to_string());
        return Ok(None);
    }

    print_section_header("New configuration");
    let draft = prompt_new_config(collection)?;

    match create_config(
        store,
        collection,
        &draft.name,
        &draft.row_delimiter,
        &draft.col_delimiter,
        draft.column_names,
    ) {
        Ok(updated) => {
            *collection = updated;
            print_success(&format!("Configuration '{}' saved", draft.name));
            Ok(collection.get(&draft.name).cloned())
        }
        Err(e) => {
            report_recoverable(e)?;
            Ok(None)
        }
    }
}

fn show_listing(collection: &ConfigCollection) {
    println!();
    for line in config_table(&list_configs(collection)).to_string().lines() {
        println!("    {}", line);
    }
    print_info(&capacity_label(collection));
}

/// Print a recoverable error and carry on; anything else is returned.
fn report_recoverable(error: SplitError) -> Result<()> {
    if error.is_recoverable() {
        print_warning(&error.to_string());
        Ok(())
    } else {
        Err(error.into())
    }
}
