use std::path::Path;
use std::time::Instant;

use super::cursor::WorkCursor;
use super::error::CountError;
use super::file_set::FileSet;
use super::reader::DEFAULT_BUFFER_SIZE;
use super::report::CountReport;
use super::table::FrequencyTable;
use super::worker::{Worker, WorkerReport};

/// Multi-threaded character counter
///
/// Owns the cursor and table shared by its workers. Each call to [`run`]
/// resets both, so one engine can be reused across runs; `&mut self` keeps two
/// runs from ever sharing them at the same time.
///
/// [`run`]: CountingEngine::run
#[derive(Debug)]
pub struct CountingEngine {
    cursor: WorkCursor,
    table: FrequencyTable,
    buffer_size: usize,
}

impl Default for CountingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CountingEngine {
    pub fn new() -> Self {
        Self::with_buffer_size(DEFAULT_BUFFER_SIZE)
    }

    /// Engine whose workers read files in chunks of `buffer_size` bytes
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self {
            cursor: WorkCursor::default(),
            table: FrequencyTable::new(),
            buffer_size: buffer_size.max(1),
        }
    }

    /// Count characters of every regular file directly inside `dir`
    ///
    /// The reported duration includes listing the directory.
    pub fn run(&mut self, dir: &Path, workers: usize) -> Result<CountReport, CountError> {
        if workers == 0 {
            return Err(CountError::InvalidWorkerCount(workers));
        }
        let start_time = Instant::now();
        let file_set = FileSet::build(dir)?;
        self.count(file_set, workers, start_time)
    }

    /// Count characters of an already built file set
    pub fn run_file_set(
        &mut self,
        file_set: FileSet,
        workers: usize,
    ) -> Result<CountReport, CountError> {
        if workers == 0 {
            return Err(CountError::InvalidWorkerCount(workers));
        }
        self.count(file_set, workers, Instant::now())
    }

    fn count(
        &mut self,
        file_set: FileSet,
        workers: usize,
        start_time: Instant,
    ) -> Result<CountReport, CountError> {
        let files_total = file_set.len();
        self.cursor.reset(file_set);
        self.table.reset();

        tracing::debug!("Counting {} files with {} workers", files_total, workers);

        let worker_reports = self.spawn_workers(workers)?;
        debug_assert_eq!(self.cursor.claimed(), files_total);

        let report = CountReport::from_workers(
            self.table.snapshot(),
            files_total,
            worker_reports,
            start_time.elapsed(),
        );

        tracing::info!(
            "Counted {} files ({} failed) with {} workers in {:.2}ms",
            report.files_counted,
            report.files_failed,
            workers,
            report.duration.as_secs_f64() * 1000.0
        );
        Ok(report)
    }

    /// Spawn `workers` scoped threads and wait for all of them
    fn spawn_workers(&self, workers: usize) -> Result<Vec<WorkerReport>, CountError> {
        let cursor = &self.cursor;
        let table = &self.table;
        let buffer_size = self.buffer_size;

        crossbeam::thread::scope(|s| -> Result<Vec<WorkerReport>, CountError> {
            let handles: Vec<_> = (0..workers)
                .map(|worker_id| {
                    s.builder()
                        .name(format!("counter-{worker_id}"))
                        .spawn(move |_| Worker::new(worker_id, cursor, table, buffer_size).run())
                })
                .collect::<Result<_, _>>()
                .map_err(CountError::Spawn)?;

            handles
                .into_iter()
                .map(|handle| handle.join().map_err(|_| CountError::WorkerPanicked))
                .collect()
        })
        .map_err(|_| CountError::WorkerPanicked)?
    }

    /// Table left by the most recent run
    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    /// Cursor of the most recent run
    pub fn cursor(&self) -> &WorkCursor {
        &self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::count::table::CharCounts;
    use std::fs;
    use tempfile::TempDir;

    fn counts(pairs: &[(char, u64)]) -> CharCounts {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_single_file_scenario() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("one.txt"), "aabbbc\n").unwrap();

        let mut engine = CountingEngine::new();
        for workers in [1, 2, 8] {
            let report = engine.run(temp_dir.path(), workers).unwrap();
            assert_eq!(report.counts, counts(&[('a', 2), ('b', 3), ('c', 1)]));
            assert_eq!(report.workers, workers);
            assert_eq!(report.files_failed, 0);
        }
    }

    #[test]
    fn test_zero_workers_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut engine = CountingEngine::new();
        let err = engine.run(temp_dir.path(), 0).unwrap_err();
        assert!(matches!(err, CountError::InvalidWorkerCount(0)));
    }

    #[test]
    fn test_invalid_worker_count_checked_before_directory() {
        let mut engine = CountingEngine::new();
        let err = engine.run(Path::new("/definitely/not/here"), 0).unwrap_err();
        assert!(matches!(err, CountError::InvalidWorkerCount(0)));
    }

    #[test]
    fn test_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let mut engine = CountingEngine::new();
        let err = engine.run(&temp_dir.path().join("gone"), 4).unwrap_err();
        assert!(err.is_directory_access());
    }

    #[test]
    fn test_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let mut engine = CountingEngine::new();
        let report = engine.run(temp_dir.path(), 8).unwrap();

        assert!(report.counts.is_empty());
        assert_eq!(report.files_total, 0);
        assert_eq!(report.workers, 8);
    }

    #[test]
    fn test_more_workers_than_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "xx").unwrap();
        fs::write(temp_dir.path().join("b.txt"), "xyz").unwrap();

        let mut engine = CountingEngine::with_buffer_size(1);
        let report = engine.run(temp_dir.path(), 64).unwrap();
        assert_eq!(report.counts, counts(&[('x', 3), ('y', 1), ('z', 1)]));
        assert_eq!(engine.cursor().claimed(), 2);
    }

    #[test]
    fn test_successive_runs_do_not_leak_counts() {
        let first = TempDir::new().unwrap();
        fs::write(first.path().join("a.txt"), "aaaa").unwrap();
        let second = TempDir::new().unwrap();
        fs::write(second.path().join("b.txt"), "b").unwrap();

        let mut engine = CountingEngine::new();
        engine.run(first.path(), 2).unwrap();
        let report = engine.run(second.path(), 2).unwrap();

        assert_eq!(report.counts, counts(&[('b', 1)]));
        assert_eq!(engine.table().get('a'), 0);
    }

    #[test]
    fn test_unreadable_entry_reported() {
        let temp_dir = TempDir::new().unwrap();
        let mut paths = Vec::new();
        for i in 0..9 {
            let path = temp_dir.path().join(format!("{i}.txt"));
            fs::write(&path, "ab").unwrap();
            paths.push(path);
        }
        paths.push(temp_dir.path().join("vanished.txt"));

        let mut engine = CountingEngine::new();
        let report = engine.run_file_set(FileSet::from_paths(paths), 4).unwrap();

        assert_eq!(report.files_total, 10);
        assert_eq!(report.files_counted, 9);
        assert_eq!(report.files_failed, 1);
        assert_eq!(report.counts, counts(&[('a', 9), ('b', 9)]));
    }
}
