//! Character counting over a directory of text files
//!
//! The multi-threaded path is built from four pieces:
//!
//! ```text
//! FileSet ──▶ WorkCursor ──claim──▶ Worker × N ──merge──▶ FrequencyTable
//!                 ▲                                            │
//!                 └──────────── CountingEngine ◀──snapshot─────┘
//! ```
//!
//! - [`FileSet`]: the regular files directly inside the target directory
//! - [`WorkCursor`]: hands each file to exactly one worker
//! - [`FrequencyTable`]: per-character atomic counters shared by all workers
//! - [`CountingEngine`]: resets the shared state, spawns and joins the workers
//!
//! [`SequentialCounter`] counts the same file set on one thread and must
//! always produce the same table.
//!
//! Characters are bytes. Space, tab, newline and carriage return are never
//! counted.

pub mod cursor;
pub mod engine;
pub mod error;
pub mod file_set;
pub mod reader;
pub mod report;
pub mod sequential;
pub mod table;
pub mod worker;

pub use cursor::WorkCursor;
pub use engine::CountingEngine;
pub use error::{CountError, FileReadError};
pub use file_set::FileSet;
pub use report::CountReport;
pub use sequential::SequentialCounter;
pub use table::{CharCounts, CharTally, FrequencyTable, is_excluded};
pub use worker::{Worker, WorkerReport};
