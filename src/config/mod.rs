//! Configuration management for charcount
//!
//! Settings are layered with figment, lowest priority first:
//!
//! 1. Embedded `default-config.toml`
//! 2. User config `~/.config/charcount/config.toml`
//! 3. `charcount.toml` in the working directory
//! 4. A file passed with `--config`
//! 5. `CHARCOUNT_` environment variables, nested with `__`

use anyhow::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::bench::BenchmarkConfig;
use crate::generate::GenerateOptions;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharcountConfig {
    pub count: CountConfig,
    pub bench: BenchConfig,
    pub generate: GenerateConfig,
}

/// Settings for `charcount count`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountConfig {
    /// Worker threads (0 = auto)
    pub workers: usize,
    /// Percentage of CPU cores used when `workers` is 0
    pub thread_percentage: u8,
    pub read_buffer_kb: usize,
}

/// Settings for `charcount bench`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    pub iterations: usize,
    pub max_workers: usize,
}

/// Settings for `charcount generate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    pub files: usize,
    pub min_size: usize,
    pub max_size: usize,
}

impl CharcountConfig {
    pub fn load() -> Result<Self> {
        Self::load_with_custom_config(None)
    }

    pub fn load_with_custom_config(custom_config: Option<&str>) -> Result<Self> {
        let mut figment = Figment::new()
            .merge(Toml::string(DEFAULT_CONFIG))
            .merge(Toml::file(Self::user_config_path()))
            .merge(Toml::file("charcount.toml"));

        if let Some(custom_path) = custom_config {
            if !Path::new(custom_path).is_file() {
                bail!("Config file not found: {}", custom_path);
            }
            figment = figment.merge(Toml::file(custom_path));
        }

        // Environment variables always have highest priority
        figment = figment.merge(Env::prefixed("CHARCOUNT_").split("__"));

        let config: CharcountConfig = figment
            .extract()
            .context("Failed to parse charcount configuration")?;
        config.validate()?;

        tracing::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.count.thread_percentage == 0 || self.count.thread_percentage > 100 {
            bail!(
                "count.thread_percentage must be between 1 and 100, got {}",
                self.count.thread_percentage
            );
        }
        if self.count.read_buffer_kb == 0 {
            bail!("count.read_buffer_kb must be at least 1");
        }
        if self.bench.iterations == 0 {
            bail!("bench.iterations must be at least 1");
        }
        if self.generate.min_size > self.generate.max_size {
            bail!("generate.min_size must not exceed generate.max_size");
        }
        Ok(())
    }

    /// Read buffer size in bytes
    pub fn read_buffer_size(&self) -> usize {
        self.count.read_buffer_kb * 1024
    }

    pub fn benchmark_config(&self) -> BenchmarkConfig {
        BenchmarkConfig {
            iterations: self.bench.iterations,
            max_workers: self.bench.max_workers,
            buffer_size: self.read_buffer_size(),
        }
    }

    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            files: self.generate.files,
            min_size: self.generate.min_size,
            max_size: self.generate.max_size,
            seed: None,
        }
    }

    fn user_config_path() -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{}/.config/charcount/config.toml", home),
            Err(_) => "~/.config/charcount/config.toml".to_string(),
        }
    }
}
