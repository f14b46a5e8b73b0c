//! Batch extractor: convert every Office document under a directory to JSON.

use std::path::PathBuf;

use clap::Parser;
use clap::error::ErrorKind;
use docsync::{extract, logging};

#[derive(Parser)]
#[command(
    name = "convert-docs",
    about = "Extract text from .docx/.pptx files into sibling JSON artifacts"
)]
struct Cli {
    /// Root directory scanned recursively for Office documents.
    directory: PathBuf,
}

fn main() {
    logging::init_tracing();

    // Usage mistakes exit 1; --help/--version keep clap's zero exit.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return;
        }
        Err(err) => {
            let _ = err.print();
            std::process::exit(1);
        }
    };

    let summary = extract::convert_directory(&cli.directory);
    tracing::info!(
        converted = summary.converted,
        failed = summary.failed,
        "Conversion finished"
    );
}
