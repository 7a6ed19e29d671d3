//! `contactsync config` command - Configuration inspection

use clap::Subcommand;
use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::load_config;
use crate::cli::GlobalOpts;
use crate::core::config::PROJECT_CONFIG_FILE;
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration values
    Show(ShowArgs),

    /// Show paths to configuration files
    Path,

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

/// Valid configuration keys
const VALID_KEYS: &[(&str, &str)] = &[
    ("source", "Spreadsheet file to import (.csv, .tsv, .xlsx, .xls, .ods)"),
    ("sheet", "Sheet/tab name inside a workbook (default: Contacts)"),
    ("api_base_url", "Directory API base URL"),
    ("access_token", "OAuth bearer token for the directory API"),
    ("timeout_secs", "Per-request timeout for directory API calls"),
    ("log_file", "Durable execution log file"),
    ("field_map", "Column header overrides keyed by field (e.g. givenName: First Name)"),
];

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args, global),
        ConfigCommands::Path => run_path(global),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?.redacted();

    // If a specific key is requested, show just that value
    if let Some(key) = &args.key {
        return match get_config_value(&config, key)? {
            Some(v) => {
                println!("{}", v);
                Ok(())
            }
            None => Err(miette::miette!("Key '{}' is not set", key)),
        };
    }

    println!("{}", style("Effective Configuration").bold().underlined());
    println!();
    print_config_value("source", config.source());
    print_config_value("sheet", Some(config.sheet()));
    print_config_value("api_base_url", Some(config.api_base_url()));
    print_config_value("access_token", config.access_token.as_deref());
    print_config_value("timeout_secs", Some(config.timeout().as_secs().to_string().as_str()));
    print_config_value(
        "log_file",
        config.log_file.as_ref().map(|p| p.display().to_string()).as_deref(),
    );

    println!();
    println!("{}", style("Field Mapping").bold().underlined());
    println!();
    for (field, header) in config.mapping_table().iter() {
        let marker = if config.field_map.contains_key(&field) {
            style("*").yellow().to_string()
        } else {
            " ".to_string()
        };
        println!("  {}{:<24} {}", marker, style(field.as_str()).cyan(), header);
    }

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  1. Command-line flags (--source, --sheet, --log-file)");
    println!("  2. Environment variables (CONTACTSYNC_SOURCE, CONTACTSYNC_SHEET, CONTACTSYNC_ACCESS_TOKEN, ...)");
    println!("  3. Project config (./{} or --config)", PROJECT_CONFIG_FILE);
    println!("  4. Global config (~/.config/contactsync/config.yaml)");

    Ok(())
}

fn get_config_value(config: &Config, key: &str) -> Result<Option<String>> {
    let value = match key {
        "source" => config.source().map(str::to_string),
        "sheet" => Some(config.sheet().to_string()),
        "api_base_url" => Some(config.api_base_url().to_string()),
        "access_token" => config.access_token.clone(),
        "timeout_secs" => Some(config.timeout().as_secs().to_string()),
        "log_file" => config.log_file.as_ref().map(|p| p.display().to_string()),
        _ => {
            if let Some(field) = key.strip_prefix("field_map.") {
                let field = field.parse().map_err(|e: String| miette::miette!("{}", e))?;
                Some(config.mapping_table().header(field).to_string())
            } else {
                return Err(miette::miette!(
                    "Unknown config key: '{}'. Run 'contactsync config keys' to list valid keys",
                    key
                ));
            }
        }
    };
    Ok(value)
}

fn print_config_value(key: &str, value: Option<&str>) {
    match value {
        Some(v) => println!("  {:<14} {}", style(key).cyan(), v),
        None => println!("  {:<14} {}", style(key).cyan(), style("(not set)").dim()),
    }
}

fn run_path(global: &GlobalOpts) -> Result<()> {
    let global_path = Config::global_config_path();
    let project_path = global
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(PROJECT_CONFIG_FILE));

    match global_path {
        Some(path) => print_path("Global", &path),
        None => println!("  {:<8} {}", "Global", style("(unavailable)").dim()),
    }
    print_path("Project", &project_path);
    Ok(())
}

fn print_path(label: &str, path: &std::path::Path) {
    let state = if path.exists() {
        style("(exists)").green()
    } else {
        style("(not found)").dim()
    };
    println!("  {:<8} {} {}", label, path.display(), state);
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available Configuration Keys").bold().underlined());
    println!();
    for (key, description) in VALID_KEYS {
        println!("  {:<14} {}", style(key).cyan(), description);
    }
    Ok(())
}
