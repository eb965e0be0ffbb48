//! Interactive prompts using dialoguer

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::pipeline::{unescape_delimiter, validate_name, ConfigCollection};

/// Upper bound on columns accepted at the prompt
const MAX_PROMPT_COLUMNS: usize = 256;

/// Prompt user to confirm an action
pub fn confirm_step(message: &str, default: bool) -> Result<bool> {
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(message)
        .default(default)
        .interact()?;
    Ok(confirmed)
}

/// Prompt user to confirm deleting a configuration
pub fn confirm_delete(name: &str) -> Result<bool> {
    confirm_step(&format!("Delete configuration '{}'?", name), false)
}

/// Fields typed in for a new configuration, delimiters already unescaped
#[derive(Debug, Clone)]
pub struct ConfigDraft {
    pub name: String,
    pub row_delimiter: String,
    pub col_delimiter: String,
    pub column_names: Vec<String>,
}

/// Walk the user through the fields of a new configuration.
///
/// Each field is checked as it is typed. Nothing is saved here.
pub fn prompt_new_config(existing: &ConfigCollection) -> Result<ConfigDraft> {
    let theme = ColorfulTheme::default();

    let name: String = Input::with_theme(&theme)
        .with_prompt("Configuration name")
        .validate_with(|input: &String| -> Result<(), String> {
            let trimmed = input.trim();
            validate_name(trimmed)?;
            if existing.contains(trimmed) {
                return Err(format!("'{}' already exists", trimmed));
            }
            Ok(())
        })
        .interact_text()?;

    let row_delimiter = prompt_delimiter(&theme, "Row delimiter (\\n for newline)", "\\n")?;
    let col_delimiter = prompt_delimiter(&theme, "Column delimiter (\\t for tab)", ",")?;

    let num_columns: usize = Input::with_theme(&theme)
        .with_prompt("Number of columns")
        .validate_with(|n: &usize| -> Result<(), String> {
            if *n == 0 || *n > MAX_PROMPT_COLUMNS {
                Err(format!("Enter a number between 1 and {}", MAX_PROMPT_COLUMNS))
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let mut column_names: Vec<String> = Vec::with_capacity(num_columns);
    for i in 1..=num_columns {
        let column: String = {
            let taken = column_names.clone();
            Input::with_theme(&theme)
                .with_prompt(format!("Name of column {}", i))
                .default(format!("column_{}", i))
                .validate_with(move |input: &String| -> Result<(), String> {
                    if taken.contains(input) {
                        Err(format!("'{}' is already a column name", input))
                    } else {
                        Ok(())
                    }
                })
                .interact_text()?
        };
        column_names.push(column);
    }

    Ok(ConfigDraft {
        name: name.trim().to_string(),
        row_delimiter,
        col_delimiter,
        column_names,
    })
}

fn prompt_delimiter(theme: &ColorfulTheme, prompt: &str, default: &str) -> Result<String> {
    let raw: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .default(default.to_string())
        .validate_with(|input: &String| -> Result<(), String> {
            if input.is_empty() {
                Err("Delimiter must not be empty".to_string())
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(unescape_delimiter(&raw))
}

/// What the user picked from the configuration list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigChoice {
    /// One-based position of an existing configuration
    Existing(usize),
    CreateNew,
    Back,
}

/// Show the configuration list with create and back entries
pub fn select_config_prompt(collection: &ConfigCollection, allow_create: bool) -> Result<ConfigChoice> {
    let mut items: Vec<String> = collection
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. {}", i + 1, c.name))
        .collect();
    if allow_create {
        items.push("0. Create new configuration".to_string());
    }
    items.push("Back".to_string());

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Choose a configuration")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(choice_for_selection(selection, collection.len(), allow_create))
}

/// Map a zero-based menu position onto a [`ConfigChoice`]
pub fn choice_for_selection(selection: usize, config_count: usize, allow_create: bool) -> ConfigChoice {
    if selection < config_count {
        ConfigChoice::Existing(selection + 1)
    } else if allow_create && selection == config_count {
        ConfigChoice::CreateNew
    } else {
        ConfigChoice::Back
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_for_selection() {
        assert_eq!(choice_for_selection(0, 2, true), ConfigChoice::Existing(1));
        assert_eq!(choice_for_selection(1, 2, true), ConfigChoice::Existing(2));
        assert_eq!(choice_for_selection(2, 2, true), ConfigChoice::CreateNew);
        assert_eq!(choice_for_selection(3, 2, true), ConfigChoice::Back);
        assert_eq!(choice_for_selection(2, 2, false), ConfigChoice::Back);
    }
}
