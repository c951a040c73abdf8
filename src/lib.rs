//! # charcount - concurrent character frequency counting
//!
//! Counts how often each character occurs across the files of a directory,
//! using either a single-threaded baseline or a pool of worker threads that
//! claim files from a shared cursor and merge into a shared atomic table.
//!
//! ## Quick Start
//!
//! ```bash
//! # Write 100 random text files
//! charcount generate ./book
//!
//! # Count them with 8 workers
//! charcount count ./book --workers 8
//!
//! # Compare the baseline with 1, 2, 4, ... 64 workers
//! charcount bench ./book
//! ```
//!
//! ## Library use
//!
//! ```rust,no_run
//! use charcount::count::CountingEngine;
//! use std::path::Path;
//!
//! let mut engine = CountingEngine::new();
//! let report = engine.run(Path::new("./book"), 8)?;
//! for (ch, count) in &report.counts {
//!     println!("{ch} => {count}");
//! }
//! # Ok::<(), charcount::count::CountError>(())
//! ```

pub mod bench;
pub mod cli;
pub mod config;
pub mod count;
pub mod generate;
pub mod parallel;

pub use cli::{Cli, Output};
pub use config::CharcountConfig;
pub use count::{CountError, CountReport, CountingEngine, SequentialCounter};

/// Result type alias for charcount operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
