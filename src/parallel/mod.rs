//! Execution strategy selection
//!
//! Decides how a counting run is executed and how many workers it gets. It
//! knows nothing about file contents; that lives in [`crate::count`].
//!
//! ## What This Module Does:
//! - **Resource Discovery**: Detects available CPU cores using `num_cpus::get()`
//! - **Resource Calculation**: Applies thread percentage and limits from configuration
//! - **Execution Strategy**: Sequential baseline vs parallel engine
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use charcount::parallel::ExecutionStrategy;
//! use std::path::Path;
//!
//! let workers = ExecutionStrategy::calculate_optimal_workers(0, 75);
//! let strategy = ExecutionStrategy::Parallel { workers };
//! let report = strategy.execute(Path::new("./book"), 64 * 1024)?;
//! println!("{} distinct characters", report.counts.len());
//! # Ok::<(), charcount::count::CountError>(())
//! ```

pub mod core;

pub use self::core::ExecutionStrategy;
