//! PDF loading.
//!
//! # Examples
//!
//! ```no_run
//! use pdfbundle::io::PdfReader;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let handle = reader.load(Path::new("input_files/report.pdf")).await?;
//! println!("{} pages", handle.page_count());
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::path::Path;
use std::time::Instant;
use tracing::debug;

use crate::document::DocumentHandle;
use crate::error::{BundleError, Result};

/// Loads existing PDF files into [`DocumentHandle`]s.
#[derive(Debug, Clone, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Read and parse the PDF at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read ([`BundleError::Io`])
    /// - The bytes are not a parseable PDF, or the PDF is encrypted
    ///   ([`BundleError::MalformedPdf`])
    pub async fn load(&self, path: &Path) -> Result<DocumentHandle> {
        let start = Instant::now();

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| BundleError::io(path, err))?;

        let document = Self::parse(path, &bytes)?;

        let handle = DocumentHandle::new(path, document);
        debug!(
            path = %path.display(),
            pages = handle.page_count(),
            bytes = bytes.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "loaded pdf"
        );

        Ok(handle)
    }

    fn parse(path: &Path, bytes: &[u8]) -> Result<Document> {
        let document = Document::load_mem(bytes).map_err(|err| {
            let message = err.to_string();
            if message.contains("encrypt") || message.contains("password") {
                BundleError::malformed_pdf(path, format!("document is encrypted: {message}"))
            } else {
                BundleError::malformed_pdf(path, message)
            }
        })?;

        if document.is_encrypted() {
            return Err(BundleError::malformed_pdf(path, "document is encrypted"));
        }

        Ok(document)
    }
}
