//! Core module - configuration, tabular input, directory API and the import/listing flows

pub mod config;
pub mod directory;
pub mod import;
pub mod listing;
pub mod source;

pub use config::{Config, ConfigError};
pub use directory::{DirectoryClient, DirectoryError, HttpDirectoryClient};
pub use import::{ImportReport, Importer, RowOutcome, RowReport, Submission};
pub use listing::{list_directory, DirectoryListing, EntrySummary};
pub use source::{Grid, SourceError, TabularSource};
