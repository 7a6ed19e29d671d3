//! `contactsync import` command - Create directory contacts from spreadsheet rows

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{config_error, load_config, truncate_str};
use crate::cli::GlobalOpts;
use crate::core::import::{to_json, ImportReport, Importer, RowOutcome, RowReport, Submission};
use crate::core::{Config, HttpDirectoryClient, SourceError, TabularSource};

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// Spreadsheet to import (overrides `source` in config)
    #[arg(long, short = 's')]
    pub source: Option<PathBuf>,

    /// Sheet/tab name inside a workbook (overrides `sheet` in config)
    #[arg(long)]
    pub sheet: Option<String>,

    /// Build and validate every row without creating contacts
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    let mut config = load_config(global)?;
    apply_overrides(&mut config, &args);

    let source = TabularSource::resolve(config.source(), config.sheet())
        .map_err(config_error)?;

    // The API must be reachable before any row is read
    let client = if args.dry_run {
        None
    } else {
        Some(
            HttpDirectoryClient::new(config.api_base_url(), config.access_token(), config.timeout())
                .map_err(config_error)?,
        )
    };

    let grid = match source.read_with_data() {
        Ok(grid) => grid,
        Err(e @ SourceError::Empty { .. }) => {
            tracing::warn!(source = %source.path().display(), "no data to import");
            println!("{} No data to import: {}", style("!").yellow(), e);
            return Ok(());
        }
        Err(e) => return Err(config_error(e)),
    };

    if !global.quiet {
        println!(
            "{} Importing contacts from {}{}",
            style("→").blue(),
            style(source.path().display()).yellow(),
            if args.dry_run {
                style(" (dry run)").dim().to_string()
            } else {
                String::new()
            }
        );
        println!();
    }

    let lookup = config.mapping_table().lookup();
    let submission = match &client {
        Some(client) => Submission::Live(client),
        None => Submission::DryRun,
    };
    let report = Importer::new(&lookup, submission).run(&grid, |row| {
        if !global.quiet || !row.outcome.is_success() {
            print_row(row, global.verbose);
        }
    });

    print_summary(&report, args.dry_run);
    Ok(())
}

fn apply_overrides(config: &mut Config, args: &ImportArgs) {
    if let Some(source) = &args.source {
        config.source = Some(source.display().to_string());
    }
    if let Some(sheet) = &args.sheet {
        config.sheet = Some(sheet.clone());
    }
}

fn print_row(report: &RowReport, verbose: bool) {
    let row = report.row;
    match &report.outcome {
        RowOutcome::Created {
            resource_name,
            label,
        } => println!(
            "{} Row {}: Created {} - {}",
            style("✓").green(),
            row,
            style(resource_name).cyan(),
            truncate_str(label, 40)
        ),
        RowOutcome::Planned(resource) => {
            println!(
                "{} Row {}: Would create {}",
                style("○").dim(),
                row,
                truncate_str(&resource.label(), 40)
            );
            if verbose {
                println!("    {}", style(to_json(resource)).dim());
            }
        }
        RowOutcome::Skipped { reason, .. } => eprintln!(
            "{} Row {}: Skipped - insufficient data ({})",
            style("✗").red(),
            row,
            reason
        ),
        RowOutcome::Rejected {
            error,
            fields,
            resource,
        } => {
            eprintln!("{} Row {}: {}", style("✗").red(), row, error);
            if verbose {
                eprintln!("    fields:   {}", style(to_json(fields)).dim());
                eprintln!("    resource: {}", style(to_json(resource)).dim());
            }
        }
    }
}

fn print_summary(report: &ImportReport, dry_run: bool) {
    println!();
    println!("{}", style("─".repeat(50)).dim());
    println!("{}", style("Import Summary").bold());
    println!("{}", style("─".repeat(50)).dim());
    println!("  Rows processed:   {}", style(report.rows_processed()).cyan());
    if dry_run {
        println!("  Would be added:   {}", style(report.added).green());
    } else {
        println!("  Contacts added:   {}", style(report.added).green());
    }
    if report.failed > 0 {
        println!("  Failed/skipped:   {}", style(report.failed).red());
        let rows: Vec<String> = report.failures().map(|r| r.row.to_string()).collect();
        println!("  Failed rows:      {}", style(rows.join(", ")).dim());
    } else {
        println!("  Failed/skipped:   {}", report.failed);
    }

    if dry_run {
        println!();
        println!(
            "{}",
            style("Dry run complete. No contacts were created.").yellow()
        );
    }
}
