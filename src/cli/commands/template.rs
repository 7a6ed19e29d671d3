//! `contactsync template` command - Print a blank import sheet header

use console::style;
use miette::Result;

use crate::cli::helpers::{escape_csv, load_config};
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct TemplateArgs {
    /// Include an example data row
    #[arg(long)]
    pub example: bool,
}

pub fn run(args: TemplateArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let table = config.mapping_table();

    let headers: Vec<String> = table.iter().map(|(_, header)| escape_csv(header)).collect();

    // Output to stdout (can be redirected to file)
    println!("{}", headers.join(","));
    if args.example {
        println!(
            "Jane,Doe,Acme Corp,Engineer,jane@acme.example,,,+1-555-0100,,,\"Met at expo, 2024\",https://acme.example,1 Main St,Springfield,IL,62701,US"
        );
    }

    // Print usage hint to stderr so it doesn't interfere with redirected output
    if !global.quiet {
        eprintln!();
        eprintln!(
            "{} Template generated. Redirect to file: contactsync template > contacts.csv",
            style("→").blue()
        );
    }

    Ok(())
}
