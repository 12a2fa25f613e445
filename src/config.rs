//! Run configuration.
//!
//! The whole configuration surface is the pair of folders a run reads from
//! and writes to.

use std::path::PathBuf;

/// Input folder used when none is given.
pub const DEFAULT_INPUT_DIR: &str = "input_files";

/// Output folder used when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "output_files";

/// Folders for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory whose entries are merged (not traversed recursively).
    pub input_dir: PathBuf,

    /// Existing directory that receives `<epoch millis>.pdf`.
    pub output_dir: PathBuf,
}

impl Config {
    /// Create a configuration for the given folders.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR)
    }
}
