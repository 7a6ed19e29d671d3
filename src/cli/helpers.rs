//! Shared helper functions for CLI commands

use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::Config;

/// Load layered configuration honoring `--config`
pub fn load_config(global: &GlobalOpts) -> Result<Config> {
    Config::load(global.config.as_deref()).map_err(|e| {
        tracing::error!(error = %e, "failed to load configuration");
        miette::miette!(help = "Check contactsync.yaml and CONTACTSYNC_* variables", "{}", e)
    })
}

/// Record a setup failure in the execution log and turn it into a diagnostic
pub fn config_error(e: impl std::fmt::Display) -> miette::Report {
    tracing::error!(error = %e, "configuration error");
    miette::miette!("Configuration error: {}", e)
}

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Replace tabs and newlines so a value stays in one TSV cell
pub fn escape_tsv(s: &str) -> String {
    s.replace(['\t', '\n', '\r'], " ")
}
