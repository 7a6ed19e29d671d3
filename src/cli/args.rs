//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, config::ConfigCommands, import::ImportArgs, list::ListArgs,
    template::TemplateArgs,
};

#[derive(Parser)]
#[command(name = "contactsync")]
#[command(author, version, about = "Sync spreadsheet contacts into a directory service")]
#[command(long_about = "Imports rows of tabular contact data into a directory service's contacts and lists the directory's existing domain entries.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Config file (default: ./contactsync.yaml if present)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (info-level logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Append the execution log to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import spreadsheet rows as directory contacts
    Import(ImportArgs),

    /// List existing domain contacts and profiles
    List(ListArgs),

    /// Print a CSV header row matching the field mapping
    Template(TemplateArgs),

    /// Show configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One human-readable line per entry
    #[default]
    Auto,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// Markdown tables
    Md,
}
