//! Benchmark harness comparing the sequential baseline with the engine
//!
//! The baseline is timed first, then the engine at 1, 2, 4, ... workers up to
//! the configured maximum. Each iteration uses a fresh engine. Every run's
//! table is checked against the baseline's.

use serde::Serialize;
use std::path::Path;
use std::time::Duration;

use crate::count::{CharCounts, CountError, CountReport};
use crate::parallel::ExecutionStrategy;

/// Benchmark settings
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Timed runs per series
    pub iterations: usize,
    /// Largest worker count tried
    pub max_workers: usize,
    pub buffer_size: usize,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            iterations: 10,
            max_workers: 64,
            buffer_size: crate::count::reader::DEFAULT_BUFFER_SIZE,
        }
    }
}

impl BenchmarkConfig {
    /// Worker counts tried: powers of two from 1 up to `max_workers`
    pub fn worker_counts(&self) -> Vec<usize> {
        std::iter::successors(Some(1usize), |n| n.checked_mul(2))
            .take_while(|&n| n <= self.max_workers)
            .collect()
    }
}

/// One timed run within a series
#[derive(Debug, Clone, Serialize)]
pub struct Sample {
    pub iteration: usize,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
    pub files_failed: usize,
}

/// All samples for one strategy
#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub label: String,
    /// `None` for the sequential baseline
    pub workers: Option<usize>,
    pub samples: Vec<Sample>,
    /// Whether every run produced the baseline's table
    pub consistent: bool,
}

impl Series {
    fn new(strategy: ExecutionStrategy) -> Self {
        let workers = match strategy {
            ExecutionStrategy::Sequential => None,
            ExecutionStrategy::Parallel { workers } => Some(workers),
        };
        Self {
            label: strategy.label(),
            workers,
            samples: Vec::new(),
            consistent: true,
        }
    }

    pub fn average(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        self.total() / self.samples.len() as u32
    }

    pub fn total(&self) -> Duration {
        self.samples.iter().map(|s| s.duration).sum()
    }

    pub fn min(&self) -> Duration {
        self.samples.iter().map(|s| s.duration).min().unwrap_or_default()
    }

    pub fn max(&self) -> Duration {
        self.samples.iter().map(|s| s.duration).max().unwrap_or_default()
    }
}

/// Everything a benchmark produced
#[derive(Debug, Serialize)]
pub struct BenchmarkReport {
    pub iterations: usize,
    pub files: usize,
    pub baseline: Series,
    pub parallel: Vec<Series>,
    /// Table from the first baseline run
    pub counts: CharCounts,
}

impl BenchmarkReport {
    /// Whether every parallel series matched the baseline table
    pub fn all_consistent(&self) -> bool {
        self.baseline.consistent && self.parallel.iter().all(|s| s.consistent)
    }

    /// Fastest parallel series by average time
    pub fn fastest(&self) -> Option<&Series> {
        self.parallel.iter().min_by_key(|s| s.average())
    }

    /// Baseline average divided by the series average
    pub fn speedup(&self, series: &Series) -> f64 {
        let parallel = series.average().as_secs_f64();
        if parallel == 0.0 {
            return 0.0;
        }
        self.baseline.average().as_secs_f64() / parallel
    }
}

/// Runs the benchmark, reporting each sample through an observer
pub struct Benchmark {
    config: BenchmarkConfig,
}

impl Benchmark {
    pub fn new(config: BenchmarkConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, dir: &Path) -> Result<BenchmarkReport, CountError> {
        self.run_with_observer(dir, |_, _, _| {})
    }

    /// Run every series; `observer` sees each series, sample and report
    pub fn run_with_observer<F>(&self, dir: &Path, mut observer: F) -> Result<BenchmarkReport, CountError>
    where
        F: FnMut(&Series, &Sample, &CountReport),
    {
        let iterations = self.config.iterations.max(1);
        tracing::info!(
            "Benchmarking {} with {} iterations, up to {} workers",
            dir.display(),
            iterations,
            self.config.max_workers
        );

        let mut reference: Option<CountReport> = None;
        let baseline = self.run_series(
            ExecutionStrategy::Sequential,
            dir,
            iterations,
            &mut reference,
            &mut observer,
        )?;

        let mut parallel = Vec::new();
        for workers in self.config.worker_counts() {
            parallel.push(self.run_series(
                ExecutionStrategy::Parallel { workers },
                dir,
                iterations,
                &mut reference,
                &mut observer,
            )?);
        }

        let (files, counts) = reference
            .map(|r| (r.files_total, r.counts))
            .unwrap_or_default();

        Ok(BenchmarkReport {
            iterations,
            files,
            baseline,
            parallel,
            counts,
        })
    }

    fn run_series<F>(
        &self,
        strategy: ExecutionStrategy,
        dir: &Path,
        iterations: usize,
        reference: &mut Option<CountReport>,
        observer: &mut F,
    ) -> Result<Series, CountError>
    where
        F: FnMut(&Series, &Sample, &CountReport),
    {
        let mut series = Series::new(strategy);

        for iteration in 1..=iterations {
            let report = strategy.execute(dir, self.config.buffer_size)?;
            let sample = Sample {
                iteration,
                duration: report.duration,
                files_failed: report.files_failed,
            };

            tracing::info!(
                "{} test #{} took {}ns",
                series.label,
                iteration,
                sample.duration.as_nanos()
            );

            if let Some(expected) = reference.as_ref() {
                if expected.counts != report.counts {
                    tracing::warn!(
                        "{} iteration {} disagrees with the baseline",
                        series.label,
                        iteration
                    );
                    series.consistent = false;
                }
            }

            observer(&series, &sample, &report);
            series.samples.push(sample);

            if reference.is_none() {
                *reference = Some(report);
            }
        }

        Ok(series)
    }
}

fn serialize_millis<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64() * 1000.0)
}
