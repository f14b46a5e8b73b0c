//! Batch conversion: walk a directory tree and emit one JSON artifact per document.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use super::{ExtractError, detect_kind, extract};

/// Errors raised while converting a single file during the walk.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Extraction of the source container failed.
    #[error(transparent)]
    Extract(#[from] ExtractError),
    /// The extracted document could not be serialized.
    #[error("Failed to serialize artifact for {path}: {source}")]
    Serialize {
        /// Source document whose artifact failed to serialize.
        path: PathBuf,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
    /// The artifact could not be written next to the source file.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Artifact path that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Counts reported after a conversion walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Documents successfully converted to JSON artifacts.
    pub converted: usize,
    /// Documents that failed and were skipped.
    pub failed: usize,
}

/// Recursively convert every `.docx`/`.pptx` under `root` to a sibling `.json`.
///
/// Existing artifacts are overwritten. Per-file failures are logged and the
/// walk continues; this is the only failure-isolation layer the extractor
/// has, so callers treat a completed walk as success regardless of the
/// failure count.
pub fn convert_directory(root: &Path) -> ConvertSummary {
    let mut summary = ConvertSummary::default();

    for entry in WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
    {
        let path = entry.path();
        if detect_kind(path).is_none() {
            continue;
        }

        tracing::info!(path = %path.display(), "Converting document");
        match convert_file(path) {
            Ok(artifact) => {
                summary.converted += 1;
                tracing::debug!(artifact = %artifact.display(), "Wrote artifact");
            }
            Err(err) => {
                summary.failed += 1;
                tracing::error!(path = %path.display(), error = %err, "Failed to convert document");
            }
        }
    }

    summary
}

/// Convert one document, returning the path of the written artifact.
///
/// The artifact is pretty-printed UTF-8 JSON with 2-space indentation;
/// non-ASCII characters are written verbatim, not escaped.
fn convert_file(path: &Path) -> Result<PathBuf, ConvertError> {
    let document = extract(path)?;
    let json = serde_json::to_string_pretty(&document).map_err(|source| {
        ConvertError::Serialize {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let artifact = path.with_extension("json");
    fs::write(&artifact, json).map_err(|source| ConvertError::Write {
        path: artifact.clone(),
        source,
    })?;
    Ok(artifact)
}
