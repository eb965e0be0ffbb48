//! Report module - summarizing configurations and exports

pub mod configs;
pub mod summary;

pub use configs::*;
pub use summary::*;
