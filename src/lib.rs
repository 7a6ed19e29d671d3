//! Contact Sync
//!
//! Imports spreadsheet rows into a directory service's contacts and lists
//! the directory's existing domain entries.

pub mod cli;
pub mod contacts;
pub mod core;
