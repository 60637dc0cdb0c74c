//! CLI parser and command dispatch.

mod commands;
mod helpers;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "docuflow")]
#[command(about = "Document analysis pipeline: ingest, analyze, extract, index")]
#[command(version)]
pub struct Cli {
    /// Data directory holding records, artifacts, queue, and index
    /// (overrides config file).
    #[arg(long, short = 't', global = true)]
    target: Option<PathBuf>,

    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
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
    /// Register an uploaded object and queue it for analysis
    Ingest {
        /// Container holding the uploaded object
        #[arg(long)]
        bucket: String,
        /// Object name within the container
        #[arg(long)]
        object: String,
        /// Access-scoping department tag
        #[arg(long)]
        department: Option<String>,
    },
    /// Drain the job queue: start analysis and run the completion pipeline
    Run {
        /// Analysis fixture served as the job's paginated results
        #[arg(long)]
        fixture: PathBuf,
        /// Result page size override for the fixture client
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Show documents and their registered outputs
    Status {
        /// Document id (omit to list all documents)
        id: Option<String>,
    },
    /// Keyword search over indexed documents
    Search {
        /// Keyword to look for
        keyword: String,
    },
}

/// Parse arguments and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref(), cli.target.as_deref())?;

    match cli.command {
        Commands::Ingest {
            bucket,
            object,
            department,
        } => commands::ingest::cmd_ingest(&settings, &bucket, &object, department).await,
        Commands::Run { fixture, page_size } => {
            commands::run::cmd_run(&settings, &fixture, page_size).await
        }
        Commands::Status { id } => commands::status::cmd_status(&settings, id.as_deref()).await,
        Commands::Search { keyword } => commands::search::cmd_search(&settings, &keyword).await,
    }
}
