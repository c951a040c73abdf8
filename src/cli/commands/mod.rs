//! Command implementations for the charcount CLI
//!
//! Each command is organized into its own module.

pub mod bench;
pub mod count;
pub mod generate;

pub use bench::BenchArgs;
pub use count::CountArgs;
pub use generate::GenerateArgs;

/// Report format shared by `count` and `bench`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON format
    Json,
}
