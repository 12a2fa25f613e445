//! pdfbundle - Merge a folder of PDF and image files into a single PDF.

use clap::Parser;
use std::process;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use pdfbundle::cli::Cli;
use pdfbundle::config::Config;
use pdfbundle::pipeline::{self, RunOutcome};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Diagnostics go to stderr; stdout carries only the result line.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from(Cli::parse());

    match pipeline::run(&config).await {
        Ok(RunOutcome::Merged { output, .. }) => {
            println!("Merged PDF saved to {}", output.path.display());
        }
        Ok(RunOutcome::NothingToMerge) => {
            println!("No PDF or image files found in the input folder.");
        }
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    }
}
