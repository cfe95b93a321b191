//! contentsync CLI
//!
//! Command-line interface for exporting and replaying CMS content

use clap::{Parser, Subcommand};
use contentsync_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "contentsync")]
#[command(about = "contentsync - Export and replay CMS content through the admin API", long_about = None)]
struct Cli {
    /// Log output format
    #[arg(
        long,
        global = true,
        env = "CONTENTSYNC_LOG_FORMAT",
        default_value = "text",
        value_parser = ["text", "pretty", "json"]
    )]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Replay a snapshot file into the target instance
    Import(commands::import::ImportArgs),
    /// Export every displayed content type into a snapshot file
    Export(commands::export::ExportArgs),
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init(Profile::from_format(&cli.log_format).unwrap_or_default());

    let result = match cli.command {
        Commands::Import(args) => commands::import::execute(args),
        Commands::Export(args) => commands::export::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
