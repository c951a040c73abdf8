//! Random text fixtures for counting and benchmarking
//!
//! Writes `1.txt ..= N.txt`, each holding a random number of characters drawn
//! from the printable ASCII set (digits, letters, punctuation and whitespace).

use anyhow::{Context, Result, bail};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::{Path, PathBuf};

/// Digits, letters, punctuation and whitespace
pub const PRINTABLE: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~ \t\n\r\x0b\x0c";

/// Fixture generation settings
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub files: usize,
    pub min_size: usize,
    pub max_size: usize,
    /// Fixed seed for reproducible output
    pub seed: Option<u64>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            files: 100,
            min_size: 500,
            max_size: 9000,
            seed: None,
        }
    }
}

impl GenerateOptions {
    pub fn validate(&self) -> Result<()> {
        if self.files == 0 {
            bail!("at least one file must be generated");
        }
        if self.min_size > self.max_size {
            bail!(
                "minimum size {} exceeds maximum size {}",
                self.min_size,
                self.max_size
            );
        }
        Ok(())
    }
}

/// Write the fixture files into `dir`, creating it if needed
pub fn generate_fixtures(dir: &Path, options: &GenerateOptions) -> Result<Vec<PathBuf>> {
    options.validate()?;
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut written = Vec::with_capacity(options.files);
    for index in 1..=options.files {
        let size = rng.gen_range(options.min_size..=options.max_size);
        let content: Vec<u8> = (0..size)
            .filter_map(|_| PRINTABLE.choose(&mut rng).copied())
            .collect();

        let path = dir.join(format!("{index}.txt"));
        fs::write(&path, &content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!("Wrote {} ({} bytes)", path.display(), size);
        written.push(path);
    }

    tracing::info!("Generated {} files in {}", written.len(), dir.display());
    Ok(written)
}
