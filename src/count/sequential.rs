use std::path::Path;
use std::time::Instant;

use super::error::CountError;
use super::file_set::FileSet;
use super::reader::{DEFAULT_BUFFER_SIZE, tally_file};
use super::report::CountReport;
use super::table::CharTally;
use super::worker::WorkerReport;

/// Single-threaded reference counter
///
/// Reads the same file set the engine would, one file after another on the
/// calling thread. Used as the benchmark baseline and to cross-check results.
#[derive(Debug, Clone)]
pub struct SequentialCounter {
    buffer_size: usize,
}

impl Default for SequentialCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl SequentialCounter {
    pub fn new() -> Self {
        Self::with_buffer_size(DEFAULT_BUFFER_SIZE)
    }

    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self {
            buffer_size: buffer_size.max(1),
        }
    }

    /// Count every regular file directly inside `dir`, timing the listing too
    pub fn run(&self, dir: &Path) -> Result<CountReport, CountError> {
        let start_time = Instant::now();
        let file_set = FileSet::build(dir)?;
        Ok(self.count(&file_set, start_time))
    }

    pub fn run_file_set(&self, file_set: &FileSet) -> CountReport {
        self.count(file_set, Instant::now())
    }

    fn count(&self, file_set: &FileSet, start_time: Instant) -> CountReport {
        let mut buffer = vec![0u8; self.buffer_size];
        let mut totals = CharTally::new();
        let mut report = WorkerReport::default();

        for path in file_set {
            match tally_file(path, &mut buffer) {
                Ok(tally) => {
                    totals.absorb(&tally);
                    report.files_counted += 1;
                }
                Err(e) => {
                    tracing::warn!("{}", e);
                    report.failures.push(e);
                }
            }
        }
        report.bytes_processed = totals.bytes();

        CountReport::from_workers(
            totals.to_counts(),
            file_set.len(),
            vec![report],
            start_time.elapsed(),
        )
    }
}
