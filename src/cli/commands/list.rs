//! `contactsync list` command - Show existing directory entries

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{config_error, escape_tsv, load_config};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::listing::{list_directory, DirectoryListing, PAGE_SIZE};
use crate::core::HttpDirectoryClient;

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(long, short = 'f', default_value = "auto")]
    pub format: OutputFormat,
}

pub fn run(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let client =
        HttpDirectoryClient::new(config.api_base_url(), config.access_token(), config.timeout())
            .map_err(config_error)?;

    let listing = list_directory(&client).map_err(|e| {
        miette::miette!(
            help = "Check the access token's scopes and that the directory API is enabled",
            "Failed to list directory entries: {}",
            e
        )
    })?;

    match args.format {
        OutputFormat::Auto => print_lines(&listing, global.quiet),
        OutputFormat::Tsv => print_tsv(&listing),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&listing).into_diagnostic()?)
        }
        OutputFormat::Md => print_markdown(&listing),
    }
    Ok(())
}

fn print_lines(listing: &DirectoryListing, quiet: bool) {
    if listing.entries.is_empty() {
        println!("{} No domain contacts found in the directory.", style("→").blue());
    }
    for entry in &listing.entries {
        println!("{}", entry);
    }
    if !quiet {
        println!();
        println!("{} domain contact(s) found", style(listing.total).cyan());
        print_more_hint(listing);
    }
}

fn print_more_hint(listing: &DirectoryListing) {
    if listing.has_more {
        println!(
            "{}",
            style(format!(
                "More entries exist beyond the first {}; only one page is fetched.",
                PAGE_SIZE
            ))
            .yellow()
        );
    }
}

fn print_tsv(listing: &DirectoryListing) {
    println!("NAME\tEMAIL\tPHONE\tNOTE");
    for entry in &listing.entries {
        println!(
            "{}\t{}\t{}\t{}",
            escape_tsv(&entry.name),
            escape_tsv(entry.email.as_deref().unwrap_or_default()),
            escape_tsv(entry.phone.as_deref().unwrap_or_default()),
            escape_tsv(entry.note.as_deref().unwrap_or_default())
        );
    }
}

fn print_markdown(listing: &DirectoryListing) {
    let mut builder = Builder::default();
    builder.push_record(["Name", "Email", "Phone", "Note"]);
    for entry in &listing.entries {
        builder.push_record([
            entry.name.as_str(),
            entry.email.as_deref().unwrap_or_default(),
            entry.phone.as_deref().unwrap_or_default(),
            entry.note.as_deref().unwrap_or_default(),
        ]);
    }
    println!("{}", builder.build().with(Style::markdown()));
    println!();
    println!("**Total:** {}", listing.total);
    print_more_hint(listing);
}
