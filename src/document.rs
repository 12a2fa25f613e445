//! In-memory documents handed from the loader and converter to the merger.

use lopdf::Document;
use std::path::{Path, PathBuf};

/// A multi-page PDF ready to be merged.
#[derive(Debug, Clone)]
pub struct DocumentHandle {
    document: Document,
    source: PathBuf,
}

impl DocumentHandle {
    /// Wrap a document parsed from, or generated from, the file at `source`.
    pub fn new(source: impl AsRef<Path>, document: Document) -> Self {
        Self {
            document,
            source: source.as_ref().to_path_buf(),
        }
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// File the document was produced from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Take ownership of the underlying document.
    pub fn into_document(self) -> Document {
        self.document
    }
}
