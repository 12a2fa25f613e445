//! Error types for pdfbundle.
//!
//! Every step of a run reports failures through [`BundleError`]. Nothing is
//! recovered locally: the first error aborts the run and surfaces at the
//! top-level caller.
//!
//! # Error Categories
//!
//! - **Filesystem**: missing input directory, unreadable inputs, unwritable output
//! - **Images**: bytes that do not decode under the format implied by the extension
//! - **PDFs**: bytes that do not parse as a PDF document
//! - **Merge**: the merged document structure could not be assembled

use std::io;
use std::path::{Path, PathBuf};

/// Result type alias for pdfbundle operations.
pub type Result<T> = std::result::Result<T, BundleError>;

/// Main error type for pdfbundle operations.
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    /// The input directory does not exist.
    #[error("Input directory not found: {}", .path.display())]
    DirectoryNotFound {
        /// Directory that was requested.
        path: PathBuf,
    },

    /// Listing, reading or writing a path failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path the operation was acting on.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Image bytes could not be decoded as JPEG or PNG.
    #[error("Unsupported image format: {}\n  Reason: {reason}", .path.display())]
    UnsupportedImageFormat {
        /// Path to the image file.
        path: PathBuf,
        /// Decoder message.
        reason: String,
    },

    /// PDF bytes could not be parsed.
    #[error("Malformed PDF: {}\n  Reason: {reason}", .path.display())]
    MalformedPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// The merger was handed no documents.
    #[error("No documents to merge")]
    NoFilesToMerge,

    /// The merged document could not be assembled.
    #[error("Merge operation failed: {reason}")]
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },
}

impl From<lopdf::Error> for BundleError {
    fn from(err: lopdf::Error) -> Self {
        Self::merge_failed(err.to_string())
    }
}

impl BundleError {
    /// Create an Io error for `path`.
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create an UnsupportedImageFormat error.
    pub fn unsupported_image(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::UnsupportedImageFormat {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Create a MalformedPdf error.
    pub fn malformed_pdf(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::MalformedPdf {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }
}
