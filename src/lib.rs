//! splitcsv: Delimited Text to CSV Library
//!
//! A library for splitting delimiter-separated text blobs into tables
//! using named, persisted parsing configurations, and exporting them as CSV.

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use error::{Result, SplitError};
