//! CLI commands implementation.

mod catalog;
mod convert;
mod helpers;
mod process;
mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "rmine")]
#[command(about = "Game industry report analysis and cataloging system")]
#[command(version)]
pub struct Cli {
    /// Repository root containing the report tree
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Document collection file (default: data/documents.json under the root)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Config file (default: reportminer.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a range of documents from the collection
    Process {
        /// First document index to process
        #[arg(long, default_value = "0")]
        start: usize,
        /// End index, exclusive (0 = end of collection)
        #[arg(long, default_value = "0")]
        end: usize,
        /// Re-analyze documents that are already processed
        #[arg(short, long)]
        force: bool,
    },

    /// Show processing status of the collection
    Status,

    /// Generate a markdown catalog of the report tree
    Catalog {
        /// Output file (default: CATALOG.md under the root)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write extracted-text .md companions next to each PDF
    Convert {
        /// Overwrite existing companions
        #[arg(short, long)]
        force: bool,
    },
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(root) = cli.root {
        settings.repo_root = root;
    }
    if let Some(store) = cli.store {
        settings.store_path = store;
    }

    match cli.command {
        Commands::Process { start, end, force } => {
            process::cmd_process(&settings, start, end, force)
        }
        Commands::Status => status::cmd_status(&settings),
        Commands::Catalog { output } => catalog::cmd_catalog(&settings, output),
        Commands::Convert { force } => convert::cmd_convert(&settings, force),
    }
}
