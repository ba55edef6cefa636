//! pocketlog CLI
//!
//! Renders message templates from the shell

use clap::{Parser, Subcommand};
use pocketlog_core::logging_facility;
use pocketlog_core::LoggerConfig;
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "pocketlog")]
#[command(about = "pocketlog - Structured message templates", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render a template with arguments and named properties
    Render(commands::render::RenderArgs),
    /// List the placeholders of a template
    Tokens(commands::tokens::TokensArgs),
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => LoggerConfig::load(path)?,
        None => LoggerConfig::default(),
    };
    logging_facility::init(config.profile);

    match cli.command {
        Commands::Render(args) => commands::render::execute(args, &config),
        Commands::Tokens(args) => commands::tokens::execute(args),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
