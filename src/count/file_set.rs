use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::slice;

use super::error::CountError;

/// Regular files found directly inside one directory
///
/// Built once per run and never mutated afterwards. Ordering follows the
/// directory listing; counting results do not depend on it.
#[derive(Debug, Clone, Default)]
pub struct FileSet {
    files: Vec<PathBuf>,
}

impl FileSet {
    /// List the regular files directly inside `dir`
    ///
    /// Subdirectories and other non-regular entries are skipped. Symlinks are
    /// followed and dangling ones skipped; entries whose type cannot be
    /// determined for any other reason are kept so the run reports them.
    pub fn build(dir: &Path) -> Result<Self, CountError> {
        let metadata = fs::metadata(dir).map_err(|source| CountError::DirectoryAccess {
            path: dir.to_path_buf(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(CountError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }

        let listing_error = |source: io::Error| CountError::DirectoryAccess {
            path: dir.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(listing_error)? {
            let path = entry.map_err(listing_error)?.path();
            match fs::metadata(&path) {
                Ok(meta) if meta.is_file() => files.push(path),
                Ok(_) => tracing::trace!("Skipping non-regular entry {}", path.display()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    tracing::debug!("Skipping dangling entry {}", path.display())
                }
                // Reading it will fail too and be reported as a failed file
                Err(_) => files.push(path),
            }
        }

        tracing::debug!("Discovered {} files in {}", files.len(), dir.display());
        Ok(Self { files })
    }

    /// Use an explicit list of paths as the file set
    pub fn from_paths(files: Vec<PathBuf>) -> Self {
        Self { files }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.files.get(index).map(PathBuf::as_path)
    }

    pub fn iter(&self) -> slice::Iter<'_, PathBuf> {
        self.files.iter()
    }
}

impl<'a> IntoIterator for &'a FileSet {
    type Item = &'a PathBuf;
    type IntoIter = slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
