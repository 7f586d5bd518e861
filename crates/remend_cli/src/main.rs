//! remend CLI
//!
//! Scans a checked-out repository for superficial defects, mechanically
//! rewrites the offending lines, and re-runs the repository's own checks in
//! a bounded loop.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{run_execute, run_scan};

/// remend - mechanical repository repair with re-verification
#[derive(Parser)]
#[command(name = "remend")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bounded detect/fix/verify loop over a repository
    Run {
        /// Repository directory
        path: PathBuf,

        /// Maximum number of iterations
        #[arg(long)]
        max_iterations: Option<usize>,

        /// Timeout for verification commands, in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Report findings without touching any file
    Scan {
        /// Repository directory
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(clean) => {
            if clean {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    match &cli.command {
        Commands::Run {
            path,
            max_iterations,
            timeout_secs,
            format,
        } => run_execute(&cli, path, *max_iterations, *timeout_secs, *format),
        Commands::Scan { path, format } => run_scan(&cli, path, *format),
    }
}
