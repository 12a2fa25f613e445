//! File I/O for pdfbundle.
//!
//! - Loading existing PDF documents from disk
//! - Writing the merged PDF under a timestamped name

pub mod reader;
pub mod writer;

pub use reader::PdfReader;
pub use writer::{Clock, FixedClock, OutputArtifact, PdfWriter, SystemClock};

use crate::document::DocumentHandle;
use crate::error::Result;
use std::path::Path;

/// Load a PDF document from a file.
///
/// Convenience wrapper around [`PdfReader::load`].
///
/// # Examples
///
/// ```no_run
/// use pdfbundle::io::load_pdf;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let handle = load_pdf(Path::new("document.pdf")).await?;
/// println!("Loaded PDF with {} pages", handle.page_count());
/// # Ok(())
/// # }
/// ```
pub async fn load_pdf(path: &Path) -> Result<DocumentHandle> {
    PdfReader::new().load(path).await
}
