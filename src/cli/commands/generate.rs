use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::cli::Output;
use crate::config::CharcountConfig;
use crate::generate::generate_fixtures;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Directory to write the files into (created if missing)
    #[arg(value_name = "DIR")]
    pub directory: PathBuf,

    /// Number of files to write
    #[arg(long)]
    pub files: Option<usize>,

    /// Minimum characters per file
    #[arg(long)]
    pub min_size: Option<usize>,

    /// Maximum characters per file
    #[arg(long)]
    pub max_size: Option<usize>,

    /// Seed for reproducible content
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: GenerateArgs, config: &CharcountConfig, output: &Output) -> Result<()> {
    let mut options = config.generate_options();
    options.files = args.files.unwrap_or(options.files);
    options.min_size = args.min_size.unwrap_or(options.min_size);
    options.max_size = args.max_size.unwrap_or(options.max_size);
    options.seed = args.seed;

    let written = generate_fixtures(&args.directory, &options)?;
    output.success(&format!(
        "Generated {} files in {}",
        written.len(),
        args.directory.display()
    ));
    Ok(())
}
