//! CLI module - argument parsing, interactive menu, and session driver

mod args;
pub mod convert;
pub mod menu;
pub mod prompts;
pub mod session;

pub use args::{Cli, Commands};
pub use convert::run_convert;
pub use menu::run_menu;
pub use prompts::*;
pub use session::{drive_session, run_interactive_session};
