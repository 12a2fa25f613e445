//! PDF serialization and output naming.
//!
//! The merged document is written to `<output_dir>/<epoch millis>.pdf`. The
//! output directory must already exist; it is never created. The bytes go to a
//! `.tmp` sibling first and are renamed into place. Two writes in
//! the same millisecond resolve to the same name, and the later one replaces
//! the earlier file.
//!
//! # Examples
//!
//! ```no_run
//! use pdfbundle::io::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! let artifact = writer.write(doc, Path::new("output_files")).await?;
//! println!("wrote {}", artifact.path.display());
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::task;
use tracing::info;

use crate::error::{BundleError, Result};

/// Source of the timestamp used to name output files.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// A file produced by [`PdfWriter::write`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    /// Where the document was written.
    pub path: PathBuf,
    /// Number of bytes written.
    pub size: u64,
}

impl OutputArtifact {
    /// Format the size as a human-readable string.
    pub fn format_size(&self) -> String {
        format_file_size(self.size)
    }
}

/// Writes documents under timestamped names.
#[derive(Debug, Clone)]
pub struct PdfWriter<C = SystemClock> {
    clock: C,
}

impl PdfWriter<SystemClock> {
    /// Create a writer that names files after the current time.
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl Default for PdfWriter<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> PdfWriter<C> {
    /// Create a writer that names files using `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Path a write performed now would produce.
    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("{}.pdf", self.clock.now_millis()))
    }

    /// Serialize `doc` and write it to `output_dir/<epoch millis>.pdf`.
    ///
    /// An existing file with the same name is overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::Io`] if serialization fails or the file cannot be
    /// written, including when `output_dir` does not exist.
    pub async fn write(&self, mut doc: Document, output_dir: &Path) -> Result<OutputArtifact> {
        let start = Instant::now();

        let bytes = task::spawn_blocking(move || {
            let mut buffer = Vec::new();
            doc.save_to(&mut buffer).map(|_| buffer)
        })
        .await
        .map_err(|err| BundleError::io(output_dir, io::Error::other(err)))?
        .map_err(|err| BundleError::io(output_dir, io::Error::other(err)))?;

        // Write beside the target and rename, so a failed write leaves no output.
        let path = self.output_path(output_dir);
        let temp_path = path.with_extension("tmp");
        if let Err(err) = tokio::fs::write(&temp_path, &bytes).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(BundleError::io(&temp_path, err));
        }
        if let Err(err) = tokio::fs::rename(&temp_path, &path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(BundleError::io(&path, err));
        }

        let artifact = OutputArtifact {
            path,
            size: bytes.len() as u64,
        };

        info!(
            path = %artifact.path.display(),
            size = %artifact.format_size(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "wrote merged pdf"
        );

        Ok(artifact)
    }
}

/// Format file size as human-readable string.
fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
