//! Extension-based routing of input files.
//!
//! Classification only looks at the file name; it never touches the
//! filesystem.

use std::ffi::OsStr;
use std::fmt;
use std::path::Path;

/// Image container implied by a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageEncoding {
    /// `.jpg` / `.jpeg`
    Jpeg,
    /// `.png`
    Png,
}

/// What the pipeline does with a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// An existing PDF to load.
    Pdf,
    /// A raster image to wrap in a one-page PDF.
    Image(ImageEncoding),
    /// Anything else; skipped.
    Unsupported,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => write!(f, "pdf"),
            Self::Image(ImageEncoding::Jpeg) => write!(f, "jpeg image"),
            Self::Image(ImageEncoding::Png) => write!(f, "png image"),
            Self::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// Classify a file by its extension, ignoring case.
///
/// `.jpg` and `.jpeg` both map to [`ImageEncoding::Jpeg`]; the bytes are not
/// sniffed, so a PNG saved as `scan.jpg` is later decoded as JPEG and fails.
///
/// # Examples
///
/// ```
/// use pdfbundle::classify::{classify, FileKind, ImageEncoding};
///
/// assert_eq!(classify("Report.PDF"), FileKind::Pdf);
/// assert_eq!(classify("photo.jpeg"), FileKind::Image(ImageEncoding::Jpeg));
/// assert_eq!(classify("notes.txt"), FileKind::Unsupported);
/// ```
pub fn classify(path: impl AsRef<Path>) -> FileKind {
    let Some(extension) = path.as_ref().extension().and_then(OsStr::to_str) else {
        return FileKind::Unsupported;
    };

    match extension.to_ascii_lowercase().as_str() {
        "pdf" => FileKind::Pdf,
        "jpg" | "jpeg" => FileKind::Image(ImageEncoding::Jpeg),
        "png" => FileKind::Image(ImageEncoding::Png),
        _ => FileKind::Unsupported,
    }
}
