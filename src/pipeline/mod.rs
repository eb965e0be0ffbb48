//! Pipeline module - configurations, parsing, export, and the session cycle

pub mod actions;
pub mod config;
pub mod exporter;
pub mod parser;
pub mod session;
pub mod store;

pub use actions::*;
pub use config::*;
pub use exporter::*;
pub use parser::*;
pub use session::*;
pub use store::*;
