//! Input directory listing.

use std::io;
use std::path::{Path, PathBuf};

use tokio::task;
use tracing::debug;
use walkdir::WalkDir;

use crate::classify::{FileKind, classify};
use crate::error::{BundleError, Result};

/// A directory entry together with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEntry {
    path: PathBuf,
    kind: FileKind,
}

impl InputEntry {
    /// Classify `path` and wrap it as an entry.
    pub fn new(path: PathBuf) -> Self {
        let kind = classify(&path);
        Self { path, kind }
    }

    /// Full path of the entry (input directory joined with the entry name).
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// How the pipeline will treat this entry.
    pub fn kind(&self) -> FileKind {
        self.kind
    }
}

/// List the entries directly under `dir`, classified, in byte-wise name order.
///
/// Subdirectories are listed like any other entry but never descended into.
///
/// # Errors
///
/// - [`BundleError::DirectoryNotFound`] if `dir` does not exist.
/// - [`BundleError::Io`] if `dir` is not a directory or cannot be listed.
pub async fn scan_directory(dir: &Path) -> Result<Vec<InputEntry>> {
    let metadata = match tokio::fs::metadata(dir).await {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(BundleError::DirectoryNotFound {
                path: dir.to_path_buf(),
            });
        }
        Err(err) => return Err(BundleError::io(dir, err)),
    };

    if !metadata.is_dir() {
        return Err(BundleError::io(
            dir,
            io::Error::from(io::ErrorKind::NotADirectory),
        ));
    }

    let dir_buf = dir.to_path_buf();
    let paths = task::spawn_blocking(move || list_entries(&dir_buf))
        .await
        .map_err(|err| BundleError::io(dir, io::Error::other(err)))??;

    debug!(dir = %dir.display(), entries = paths.len(), "listed input directory");

    Ok(paths.into_iter().map(InputEntry::new).collect())
}

fn list_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            entry.map(walkdir::DirEntry::into_path).map_err(|err| {
                let path = err.path().unwrap_or(dir).to_path_buf();
                BundleError::io(path, err.into())
            })
        })
        .collect()
}
