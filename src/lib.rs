//! pdfbundle - Merge a folder of PDF and image files into a single PDF.
//!
//! A run lists the input folder in name order, loads every `.pdf`, wraps
//! every `.jpg`/`.jpeg`/`.png` in a one-page PDF sized to the image, and
//! concatenates all pages into one document written as
//! `<output folder>/<epoch millis>.pdf`.
//!
//! # Examples
//!
//! ```no_run
//! use pdfbundle::config::Config;
//! use pdfbundle::pipeline::{self, RunOutcome};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! match pipeline::run(&Config::new("scans", "merged")).await? {
//!     RunOutcome::Merged { output, statistics } => {
//!         println!("{} pages -> {}", statistics.total_pages, output.path.display());
//!     }
//!     RunOutcome::NothingToMerge => println!("nothing to do"),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classify;
pub mod cli;
pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod io;
pub mod merge;
pub mod pipeline;
pub mod scan;

pub use config::Config;
pub use error::{BundleError, Result};
pub use pipeline::{RunOutcome, run};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
