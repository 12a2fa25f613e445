//! The scan → convert/load → merge → write run.
//!
//! A run is strictly sequential: each entry is read and decoded or parsed
//! before the next one is touched, and the first error ends the run with no
//! output written.

use tracing::{debug, info, trace};

use crate::classify::FileKind;
use crate::config::Config;
use crate::convert::convert_image;
use crate::error::Result;
use crate::io::{Clock, OutputArtifact, PdfReader, PdfWriter, SystemClock};
use crate::merge::{MergeStatistics, Merger};
use crate::scan::scan_directory;

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// A merged PDF was written.
    Merged {
        /// The file that was written.
        output: OutputArtifact,
        /// What went into it.
        statistics: MergeStatistics,
    },
    /// The input folder held no PDF or image files; nothing was written.
    NothingToMerge,
}

/// Run the pipeline, naming the output after the current time.
pub async fn run(config: &Config) -> Result<RunOutcome> {
    run_with_writer(config, &PdfWriter::<SystemClock>::new()).await
}

/// Run the pipeline with a caller-supplied writer.
///
/// # Errors
///
/// Any scanner, loader, converter, merger or writer error, unchanged. There is
/// no skip-and-continue: one bad file fails the whole run.
pub async fn run_with_writer<C: Clock>(
    config: &Config,
    writer: &PdfWriter<C>,
) -> Result<RunOutcome> {
    let entries = scan_directory(&config.input_dir).await?;
    let reader = PdfReader::new();

    let mut handles = Vec::new();
    for entry in &entries {
        let handle = match entry.kind() {
            FileKind::Pdf => reader.load(entry.path()).await?,
            FileKind::Image(encoding) => convert_image(entry.path(), encoding).await?,
            FileKind::Unsupported => {
                trace!(path = %entry.path().display(), "skipping unsupported entry");
                continue;
            }
        };
        debug!(
            path = %entry.path().display(),
            kind = %entry.kind(),
            pages = handle.page_count(),
            "queued document"
        );
        handles.push(handle);
    }

    if handles.is_empty() {
        info!(dir = %config.input_dir.display(), "no pdf or image files found");
        return Ok(RunOutcome::NothingToMerge);
    }

    let merged = Merger::new().merge(handles)?;
    let output = writer.write(merged.document, &config.output_dir).await?;

    Ok(RunOutcome::Merged {
        output,
        statistics: merged.statistics,
    })
}
