use anyhow::{Context, Result, bail};
use clap::Args;
use std::path::PathBuf;

use super::OutputFormat;
use crate::bench::{Benchmark, BenchmarkReport, Series};
use crate::cli::Output;
use crate::config::CharcountConfig;

#[derive(Args, Debug)]
pub struct BenchArgs {
    /// Directory whose files are counted (not recursive)
    #[arg(value_name = "DIR")]
    pub directory: PathBuf,

    /// Timed runs per series
    #[arg(short = 'n', long)]
    pub iterations: Option<usize>,

    /// Largest worker count; counts double from 1 up to this value
    #[arg(long)]
    pub max_workers: Option<usize>,

    /// Print the character count table from the baseline
    #[arg(long)]
    pub show_table: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub fn execute(args: BenchArgs, config: &CharcountConfig, output: &Output) -> Result<()> {
    let mut bench_config = config.benchmark_config();
    if let Some(iterations) = args.iterations {
        if iterations == 0 {
            bail!("--iterations must be at least 1");
        }
        bench_config.iterations = iterations;
    }
    if let Some(max_workers) = args.max_workers {
        bench_config.max_workers = max_workers;
    }

    let text = args.format == OutputFormat::Text;
    if text {
        output.info("Testing character counting programs begins...");
        output.info(&format!("Processing files in folder: {}", args.directory.display()));
    }

    let benchmark = Benchmark::new(bench_config);
    let report = benchmark
        .run_with_observer(&args.directory, |series, sample, _| {
            if text {
                output.step(&format!(
                    "{} test #{} takes {} nanoseconds",
                    series.label,
                    sample.iteration,
                    sample.duration.as_nanos()
                ));
            }
        })
        .with_context(|| format!("Benchmark aborted for {}", args.directory.display()))?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_text(&report, args.show_table, output),
    }

    if !report.all_consistent() {
        bail!("Parallel results disagree with the sequential baseline");
    }
    Ok(())
}

fn print_text(report: &BenchmarkReport, show_table: bool, output: &Output) {
    if show_table {
        output.header("Character count table");
        for (&ch, &count) in &report.counts {
            output.char_row(ch, count);
        }
    }

    output.header(&format!(
        "Average time over {} iterations ({} files)",
        report.iterations, report.files
    ));
    print_series(report, &report.baseline, output);
    for series in &report.parallel {
        print_series(report, series, output);
    }
    output.separator();

    if let Some(fastest) = report.fastest() {
        output.success(&format!(
            "Fastest: {} at {:.2}x the sequential baseline",
            fastest.label,
            report.speedup(fastest)
        ));
    }
    if !report.all_consistent() {
        output.error("Some runs produced a table different from the sequential baseline");
    }
}

fn print_series(report: &BenchmarkReport, series: &Series, output: &Output) {
    let detail = match series.workers {
        Some(_) => format!(
            "{} ns (min {} / max {}, {:.2}x)",
            series.average().as_nanos(),
            series.min().as_nanos(),
            series.max().as_nanos(),
            report.speedup(series)
        ),
        None => format!(
            "{} ns (min {} / max {})",
            series.average().as_nanos(),
            series.min().as_nanos(),
            series.max().as_nanos()
        ),
    };
    output.key_value(&series.label, &detail, !series.consistent);
}
