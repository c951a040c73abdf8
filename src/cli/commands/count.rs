use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use super::OutputFormat;
use crate::cli::Output;
use crate::config::CharcountConfig;
use crate::count::CountReport;
use crate::parallel::ExecutionStrategy;

#[derive(Args, Debug)]
pub struct CountArgs {
    /// Directory whose files are counted (not recursive)
    #[arg(value_name = "DIR")]
    pub directory: PathBuf,

    /// Number of worker threads (defaults to the configured or CPU-derived count)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Use the single-threaded baseline instead of the worker pool
    #[arg(long, conflicts_with = "workers")]
    pub sequential: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub fn execute(args: CountArgs, config: &CharcountConfig, output: &Output) -> Result<()> {
    let strategy = if args.sequential {
        ExecutionStrategy::Sequential
    } else {
        ExecutionStrategy::Parallel {
            workers: ExecutionStrategy::resolve_workers(
                args.workers,
                config.count.workers,
                config.count.thread_percentage,
            ),
        }
    };

    output.verbose(&format!(
        "Processing files in folder {} ({})",
        args.directory.display(),
        strategy.label()
    ));

    let report = strategy
        .execute(&args.directory, config.read_buffer_size())
        .with_context(|| format!("Counting aborted for {}", args.directory.display()))?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_text(&report, strategy, output),
    }

    Ok(())
}

fn print_text(report: &CountReport, strategy: ExecutionStrategy, output: &Output) {
    output.header("Character count table");
    for (&ch, &count) in &report.counts {
        output.char_row(ch, count);
    }

    output.separator();
    output.key_value("Strategy", &strategy.label(), false);
    output.key_value(
        "Files counted",
        &format!("{}/{}", report.files_counted, report.files_total),
        true,
    );
    output.key_value("Distinct characters", &report.counts.len().to_string(), false);
    output.key_value("Total characters", &report.total_characters().to_string(), false);
    output.key_value(
        "Time taken",
        &format!("{} nanoseconds", report.duration.as_nanos()),
        false,
    );
    output.verbose(&format!(
        "Throughput: {:.2} MB/s, {:.1} files/s",
        report.throughput_mb_per_sec(),
        report.files_per_sec()
    ));

    if report.has_failures() {
        output.alert(&format!(
            "Skipped {} of {} file(s) that could not be read",
            report.files_failed, report.files_total
        ));
        if !output.is_quiet() {
            for failure in &report.failures {
                output.list_item(&failure.to_string());
            }
        }
    } else {
        output.success("Character count completed");
    }
}
