//! The claim/process loop run by each counting thread
//!
//! A worker cycles `Claiming -> Processing -> Claiming` until the cursor is
//! exhausted, then finishes. Files are read outside any shared lock; the only
//! shared touch points are the cursor claim and the table merge.

use super::cursor::WorkCursor;
use super::error::FileReadError;
use super::reader::tally_file;
use super::table::FrequencyTable;

/// What one worker accomplished during a run
#[derive(Debug, Default)]
pub struct WorkerReport {
    pub worker_id: usize,
    pub files_counted: usize,
    pub bytes_processed: u64,
    pub failures: Vec<FileReadError>,
}

impl WorkerReport {
    /// Files this worker claimed, successful or not
    pub fn files_claimed(&self) -> usize {
        self.files_counted + self.failures.len()
    }
}

/// A counting worker borrowing the run's shared cursor and table
pub struct Worker<'run> {
    id: usize,
    cursor: &'run WorkCursor,
    table: &'run FrequencyTable,
    buffer: Vec<u8>,
}

impl<'run> Worker<'run> {
    pub fn new(
        id: usize,
        cursor: &'run WorkCursor,
        table: &'run FrequencyTable,
        buffer_size: usize,
    ) -> Self {
        Self {
            id,
            cursor,
            table,
            buffer: vec![0; buffer_size.max(1)],
        }
    }

    /// Claim and count files until none are left
    pub fn run(mut self) -> WorkerReport {
        let mut report = WorkerReport {
            worker_id: self.id,
            ..WorkerReport::default()
        };

        let cursor = self.cursor;
        while let Some(path) = cursor.claim_next() {
            tracing::trace!("worker-{} claimed {}", self.id, path.display());

            match tally_file(path, &mut self.buffer) {
                Ok(tally) => {
                    self.table.merge(&tally);
                    report.files_counted += 1;
                    report.bytes_processed += tally.bytes();
                }
                Err(e) => {
                    tracing::warn!("worker-{}: {}", self.id, e);
                    report.failures.push(e);
                }
            }
        }

        tracing::debug!(
            "worker-{} done: {} files, {} failed",
            self.id,
            report.files_counted,
            report.failures.len()
        );
        report
    }
}
