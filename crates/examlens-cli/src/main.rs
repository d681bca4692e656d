//! examlens CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "examlens", version, about = "Exam scoring and diagnostic analysis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an exam response table
    Analyze {
        /// Path to the response table CSV
        #[arg(long)]
        input: PathBuf,

        /// Separate answer key CSV; the key is read from its first data row
        #[arg(long)]
        key: Option<PathBuf>,

        /// Treat the first row of the response table as the answer key
        #[arg(long)]
        key_in_first_row: bool,

        /// Column holding student identifiers (default "Name")
        #[arg(long)]
        identifier_column: Option<String>,

        /// Score threshold for the pass/fail status column
        #[arg(long)]
        pass_threshold: Option<f64>,

        /// TOML file mapping question identifiers to topics
        #[arg(long)]
        topics: Option<PathBuf>,

        /// Output directory for exported files
        #[arg(long, default_value = "./examlens-results")]
        output: PathBuf,

        /// Output format: table, json, markdown, csv, all
        #[arg(long, default_value = "table")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a response table CSV without analyzing it
    Validate {
        /// Path to the response table CSV
        #[arg(long)]
        input: PathBuf,

        /// Column holding student identifiers (default "Name")
        #[arg(long)]
        identifier_column: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and sample data
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("examlens=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            input,
            key,
            key_in_first_row,
            identifier_column,
            pass_threshold,
            topics,
            output,
            format,
            config,
        } => commands::analyze::execute(
            input,
            key,
            key_in_first_row,
            identifier_column,
            pass_threshold,
            topics,
            output,
            format,
            config,
        ),
        Commands::Validate {
            input,
            identifier_column,
            config,
        } => commands::validate::execute(input, identifier_column, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
