use crossbeam::utils::CachePadded;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::file_set::FileSet;

/// Hands out each file of a [`FileSet`] to exactly one caller
///
/// The index is the only point all workers contend on. It is advanced with a
/// compare-and-swap so it never moves past the end of the set, and it lives on
/// its own cache line.
#[derive(Debug, Default)]
pub struct WorkCursor {
    files: FileSet,
    next: CachePadded<AtomicUsize>,
}

impl WorkCursor {
    pub fn new(files: FileSet) -> Self {
        Self {
            files,
            next: CachePadded::new(AtomicUsize::new(0)),
        }
    }

    /// Replace the backing set and rewind to the first file
    pub fn reset(&mut self, files: FileSet) {
        self.files = files;
        *self.next.get_mut() = 0;
    }

    /// Claim the next unclaimed file, or `None` once the set is exhausted
    pub fn claim_next(&self) -> Option<&Path> {
        let len = self.files.len();
        self.next
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |index| {
                (index < len).then_some(index + 1)
            })
            .ok()
            .and_then(|claimed| self.files.get(claimed))
    }

    /// Number of successful claims since the last reset
    pub fn claimed(&self) -> usize {
        self.next.load(Ordering::Acquire)
    }

    pub fn remaining(&self) -> usize {
        self.files.len() - self.claimed()
    }

    pub fn files(&self) -> &FileSet {
        &self.files
    }
}
