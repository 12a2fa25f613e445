//! CLI argument parsing for pdfbundle.
//!
//! Two optional positional arguments, nothing else.
//!
//! # Examples
//!
//! ```no_run
//! use pdfbundle::cli::Cli;
//! use pdfbundle::config::Config;
//! use clap::Parser;
//!
//! let config = Config::from(Cli::parse());
//! println!("Reading {}", config.input_dir.display());
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR};

/// Merge every PDF, JPEG and PNG file in a folder into a single PDF.
///
/// Files are taken in name order. Images become one page each, sized to
/// their pixel dimensions. The result is written to the output folder as
/// `<milliseconds since epoch>.pdf`.
#[derive(Parser, Debug)]
#[command(name = "pdfbundle")]
#[command(version)]
#[command(about = "Merge a folder of PDF and image files into a single PDF", long_about = None)]
pub struct Cli {
    /// Folder containing the PDF, JPEG and PNG files to merge
    #[arg(value_name = "INPUT_FOLDER", default_value = DEFAULT_INPUT_DIR)]
    pub input_folder: PathBuf,

    /// Existing folder to write the merged PDF into
    #[arg(value_name = "OUTPUT_FOLDER", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_folder: PathBuf,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config::new(cli.input_folder, cli.output_folder)
    }
}
