//! Error types for counting runs
//!
//! Fatal errors abort a run before any worker is spawned and are returned as
//! [`CountError`]. Per-file failures never abort a run; they are collected as
//! [`FileReadError`] values inside the run's report.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors for a counting run
#[derive(Error, Debug)]
pub enum CountError {
    /// The target directory does not exist or cannot be listed
    #[error("cannot access directory '{}': {source}", path.display())]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The target path exists but is not a directory
    #[error("'{}' is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    /// Worker count below one
    #[error("invalid worker count {0}: at least one worker is required")]
    InvalidWorkerCount(usize),

    /// The OS refused to start a worker thread
    #[error("failed to spawn counting worker: {0}")]
    Spawn(#[source] std::io::Error),

    /// A worker thread panicked while processing files
    #[error("a counting worker panicked")]
    WorkerPanicked,
}

impl CountError {
    /// Whether this error came from resolving the target directory
    pub fn is_directory_access(&self) -> bool {
        matches!(
            self,
            CountError::DirectoryAccess { .. } | CountError::NotADirectory { .. }
        )
    }
}

/// A single file that could not be opened or read to the end
#[derive(Error, Debug)]
#[error("failed to read '{}': {source}", path.display())]
pub struct FileReadError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

impl FileReadError {
    pub fn new(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

impl Serialize for FileReadError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("FileReadError", 2)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("error", &self.source.to_string())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_directory_errors_are_classified() {
        let missing = CountError::DirectoryAccess {
            path: PathBuf::from("/nope"),
            source: Error::new(ErrorKind::NotFound, "gone"),
        };
        assert!(missing.is_directory_access());
        assert!(missing.to_string().contains("/nope"));

        let file = CountError::NotADirectory {
            path: PathBuf::from("a.txt"),
        };
        assert!(file.is_directory_access());
        assert!(!CountError::InvalidWorkerCount(0).is_directory_access());
    }

    #[test]
    fn test_file_read_error_serializes_message() {
        let err = FileReadError::new("x.txt", Error::new(ErrorKind::PermissionDenied, "denied"));
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["path"], "x.txt");
        assert_eq!(json["error"], "denied");
    }
}
