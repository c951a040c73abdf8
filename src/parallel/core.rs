use std::path::Path;

use crate::count::{CountError, CountReport, CountingEngine, SequentialCounter};

/// Execution strategy for a counting run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    Sequential,
    Parallel { workers: usize },
}

impl ExecutionStrategy {
    /// Count `dir` with this strategy, reading files in `buffer_size` chunks
    pub fn execute(&self, dir: &Path, buffer_size: usize) -> Result<CountReport, CountError> {
        match *self {
            ExecutionStrategy::Sequential => {
                SequentialCounter::with_buffer_size(buffer_size).run(dir)
            }
            ExecutionStrategy::Parallel { workers } => {
                CountingEngine::with_buffer_size(buffer_size).run(dir, workers)
            }
        }
    }

    /// Human readable label used in reports
    pub fn label(&self) -> String {
        match self {
            ExecutionStrategy::Sequential => "sequential".to_string(),
            ExecutionStrategy::Parallel { workers: 1 } => "parallel (1 worker)".to_string(),
            ExecutionStrategy::Parallel { workers } => format!("parallel ({workers} workers)"),
        }
    }

    /// Calculate workers from available cores and configuration limits
    ///
    /// # Algorithm
    /// ```text
    /// 1. Detect available CPU cores: num_cpus::get()
    /// 2. Apply percentage: cores * thread_percentage / 100
    /// 3. Apply config limit: min(max_threads_config, percentage_result) if max_threads_config > 0
    /// 4. Ensure minimum: max(1, final_result)
    /// ```
    ///
    /// # Examples
    /// ```rust
    /// use charcount::parallel::ExecutionStrategy;
    ///
    /// let workers = ExecutionStrategy::calculate_optimal_workers(0, 75);
    /// assert!(workers >= 1);
    ///
    /// let workers = ExecutionStrategy::calculate_optimal_workers(8, 75);
    /// assert!(workers <= 8);
    /// ```
    pub fn calculate_optimal_workers(max_threads_config: usize, thread_percentage: u8) -> usize {
        let available_cores = num_cpus::get();

        let workers_by_percentage =
            std::cmp::max(1, (available_cores * thread_percentage as usize) / 100);

        // 0 means use percentage calculation only
        if max_threads_config > 0 {
            std::cmp::min(max_threads_config, workers_by_percentage)
        } else {
            workers_by_percentage
        }
    }

    /// Resolve an explicitly requested worker count, falling back to the
    /// resource-based calculation when none was given
    pub fn resolve_workers(requested: Option<usize>, configured: usize, thread_percentage: u8) -> usize {
        match requested {
            Some(workers) => workers,
            None if configured > 0 => configured,
            None => Self::calculate_optimal_workers(0, thread_percentage),
        }
    }
}
