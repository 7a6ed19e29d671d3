//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::contacts::{ContactField, FieldMappingTable};

/// File name of the project-level config, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "contactsync.yaml";

pub const DEFAULT_SHEET: &str = "Contacts";
pub const DEFAULT_API_BASE_URL: &str = "https://people.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config file {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Invalid config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Contact Sync configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Spreadsheet file to import from (.csv, .tsv, .xlsx, .xls, .ods)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Sheet/tab name inside a workbook
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,

    /// Base URL of the directory API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,

    /// OAuth bearer token used for directory API calls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Per-request timeout for directory API calls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Durable execution log file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    /// Column header overrides, keyed by logical field
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub field_map: BTreeMap<ContactField, String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    ///
    /// `explicit` replaces the project file lookup and must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // 1. Built-in defaults (accessors below)

        // 2. Global user config (~/.config/contactsync/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config.merge(Self::from_file(&global_path)?);
            }
        }

        // 3. Project config (./contactsync.yaml or --config)
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                config.merge(Self::from_file(path)?);
            }
            None => {
                let project_path = PathBuf::from(PROJECT_CONFIG_FILE);
                if project_path.exists() {
                    config.merge(Self::from_file(&project_path)?);
                }
            }
        }

        // 4. Environment variables
        config.apply_env(|key| std::env::var(key).ok())?;

        Ok(config)
    }

    /// Parse a single YAML config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Apply `CONTACTSYNC_*` overrides from an environment lookup
    pub fn apply_env<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(source) = var("CONTACTSYNC_SOURCE") {
            self.source = Some(source);
        }
        if let Some(sheet) = var("CONTACTSYNC_SHEET") {
            self.sheet = Some(sheet);
        }
        if let Some(url) = var("CONTACTSYNC_API_URL") {
            self.api_base_url = Some(url);
        }
        if let Some(token) = var("CONTACTSYNC_ACCESS_TOKEN") {
            self.access_token = Some(token);
        }
        if let Some(log_file) = var("CONTACTSYNC_LOG_FILE") {
            self.log_file = Some(PathBuf::from(log_file));
        }
        if let Some(timeout) = var("CONTACTSYNC_TIMEOUT_SECS") {
            let secs = timeout.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "CONTACTSYNC_TIMEOUT_SECS".to_string(),
                message: format!("'{}' is not a whole number of seconds", timeout),
            })?;
            self.timeout_secs = Some(secs);
        }
        Ok(())
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "contactsync")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.source.is_some() {
            self.source = other.source;
        }
        if other.sheet.is_some() {
            self.sheet = other.sheet;
        }
        if other.api_base_url.is_some() {
            self.api_base_url = other.api_base_url;
        }
        if other.access_token.is_some() {
            self.access_token = other.access_token;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.log_file.is_some() {
            self.log_file = other.log_file;
        }
        self.field_map.extend(other.field_map);
    }

    /// Source identifier, if one is set and non-blank
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn sheet(&self) -> &str {
        self.sheet
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_SHEET)
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE_URL)
    }

    /// Access token, if one is set and non-blank
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Field mapping table with configured header overrides applied
    pub fn mapping_table(&self) -> FieldMappingTable {
        FieldMappingTable::with_overrides(&self.field_map)
    }

    /// Copy safe for display, with the access token masked
    pub fn redacted(&self) -> Self {
        let mut shown = self.clone();
        if shown.access_token.is_some() {
            shown.access_token = Some("********".to_string());
        }
        shown
    }
}
