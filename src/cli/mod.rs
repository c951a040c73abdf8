//! Command-line interface for charcount
//!
//! This module provides the main CLI structure and command dispatch. It uses
//! clap for argument parsing and sets up tracing before any command runs.

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

mod commands;
mod output;

pub use commands::{BenchArgs, CountArgs, GenerateArgs, OutputFormat};
pub use output::Output;

use crate::config::CharcountConfig;

/// charcount - count character frequencies across a directory of text files
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Enable quiet output (minimal)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Count characters in every file of a directory
    Count(CountArgs),
    /// Time the sequential baseline against 1, 2, 4, ... workers
    Bench(BenchArgs),
    /// Write random printable-ASCII files to count
    Generate(GenerateArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);

        let output = Output::new(self.verbose > 0, self.quiet);
        let config = CharcountConfig::load_with_custom_config(self.config.as_deref())?;

        match self.command {
            Commands::Count(args) => commands::count::execute(args, &config, &output),
            Commands::Bench(args) => commands::bench::execute(args, &config, &output),
            Commands::Generate(args) => commands::generate::execute(args, &config, &output),
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // Logs go to stderr so report output on stdout stays machine readable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
