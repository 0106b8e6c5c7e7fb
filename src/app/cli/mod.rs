//! CLI Adapter.

mod generate;
mod prompt;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "sitecat")]
#[command(version)]
#[command(about = "Generate Pegasus site catalogs for common execution sites", long_about = None)]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a site catalog for one execution site
    #[clap(visible_alias = "g")]
    Generate(generate::GenerateArgs),
    /// List supported sites and what each one needs
    #[clap(visible_alias = "ls")]
    Sites,
    /// Parse an existing site catalog and summarize it
    Show {
        /// Catalog file to read
        path: PathBuf,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    crate::app::logging::init(cli.verbose);

    let result: Result<(), AppError> = match cli.command {
        Commands::Generate(args) => generate::run_generate(args),
        Commands::Sites => {
            run_sites();
            Ok(())
        }
        Commands::Show { path } => run_show(path),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_sites() {
    for site in crate::app::api::sites() {
        println!("{:<18} {}", site.kind.cli_name(), site.description);
        println!("{:<18} site: {}, needs: {}", "", site.site_name, site.needs());
    }
}

fn run_show(path: PathBuf) -> Result<(), AppError> {
    let doc = crate::app::api::show(&path)?;
    println!("✅ {} holds {} site(s)", path.display(), doc.sites().len());
    for site in doc.sites() {
        println!(
            "  {}: {} directories, {} grids, {} profiles",
            site.name,
            site.directories.len(),
            site.grids.len(),
            site.profiles.len()
        );
    }
    Ok(())
}
