//! PDF merging operations.
//!
//! # Examples
//!
//! ```no_run
//! use pdfbundle::io::load_pdf;
//! use pdfbundle::merge::merge_documents;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let a = load_pdf(Path::new("a.pdf")).await?;
//! let b = load_pdf(Path::new("b.pdf")).await?;
//!
//! let merged = merge_documents(vec![a, b])?;
//! println!("Merged {} pages", merged.statistics.total_pages);
//! # Ok(())
//! # }
//! ```

pub mod merger;

pub use merger::{MergeStatistics, MergedDocument, Merger};

use crate::document::DocumentHandle;
use crate::error::Result;

/// Merge documents in order.
///
/// Convenience function that creates a [`Merger`] and performs the merge.
///
/// # Errors
///
/// Returns an error if `handles` is empty or the output cannot be assembled.
pub fn merge_documents(handles: Vec<DocumentHandle>) -> Result<MergedDocument> {
    Merger::new().merge(handles)
}
