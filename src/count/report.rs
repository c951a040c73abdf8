use serde::Serialize;
use std::time::Duration;

use super::error::FileReadError;
use super::table::CharCounts;
use super::worker::WorkerReport;

/// Outcome of one counting run
#[derive(Debug, Serialize)]
pub struct CountReport {
    /// Character counts, ordered by character
    pub counts: CharCounts,
    /// Files in the run's file set
    pub files_total: usize,
    pub files_counted: usize,
    pub files_failed: usize,
    pub bytes_processed: u64,
    pub workers: usize,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
    pub failures: Vec<FileReadError>,
}

fn serialize_millis<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64() * 1000.0)
}

impl CountReport {
    /// Assemble a report from the reports of every worker in a run
    pub(crate) fn from_workers(
        counts: CharCounts,
        files_total: usize,
        worker_reports: Vec<WorkerReport>,
        duration: Duration,
    ) -> Self {
        let workers = worker_reports.len();
        let mut report = Self {
            counts,
            files_total,
            files_counted: 0,
            files_failed: 0,
            bytes_processed: 0,
            workers,
            duration,
            failures: Vec::new(),
        };

        for worker in worker_reports {
            report.files_counted += worker.files_counted;
            report.bytes_processed += worker.bytes_processed;
            report.failures.extend(worker.failures);
        }
        report.files_failed = report.failures.len();
        report
    }

    /// Sum of all character counts
    pub fn total_characters(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn has_failures(&self) -> bool {
        self.files_failed > 0
    }

    /// Throughput in MB/s
    pub fn throughput_mb_per_sec(&self) -> f64 {
        let seconds = self.duration.as_secs_f64();
        if seconds == 0.0 {
            return 0.0;
        }
        (self.bytes_processed as f64 / (1024.0 * 1024.0)) / seconds
    }

    /// Files per second
    pub fn files_per_sec(&self) -> f64 {
        let seconds = self.duration.as_secs_f64();
        if seconds == 0.0 {
            return 0.0;
        }
        self.files_counted as f64 / seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_from_workers_sums_reports() {
        let counts: CharCounts = [('a', 4), ('b', 1)].into_iter().collect();
        let workers = vec![
            WorkerReport {
                worker_id: 0,
                files_counted: 2,
                bytes_processed: 10,
                failures: vec![],
            },
            WorkerReport {
                worker_id: 1,
                files_counted: 1,
                bytes_processed: 5,
                failures: vec![FileReadError::new("bad.txt", Error::new(ErrorKind::Other, "x"))],
            },
        ];

        let report = CountReport::from_workers(counts, 4, workers, Duration::from_millis(500));
        assert_eq!(report.workers, 2);
        assert_eq!(report.files_counted, 3);
        assert_eq!(report.files_failed, 1);
        assert_eq!(report.bytes_processed, 15);
        assert_eq!(report.total_characters(), 5);
        assert!(report.has_failures());
        assert_eq!(report.files_per_sec(), 6.0);
    }

    #[test]
    fn test_serializes_counts_by_character() {
        let counts: CharCounts = [('z', 1), ('a', 2)].into_iter().collect();
        let report = CountReport::from_workers(counts, 1, vec![], Duration::ZERO);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["counts"]["a"], 2);
        assert_eq!(json["counts"]["z"], 1);
        assert_eq!(json["duration_ms"], 0.0);
        assert_eq!(report.throughput_mb_per_sec(), 0.0);
    }
}
