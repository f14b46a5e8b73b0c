//! Discovery of JSON artifacts for one account.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use super::render::{RenderedDocument, render_document_summary};
use crate::document::DocumentPayload;

/// Errors raised while listing and parsing an account's artifacts.
#[derive(Debug, Error)]
pub enum DiscoverError {
    /// The account's data directory does not exist.
    #[error("Data directory not found: {0}")]
    DirectoryNotFound(PathBuf),
    /// Listing or reading an artifact failed at the filesystem level.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// An artifact exists but is not valid JSON.
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        /// Artifact containing the malformed JSON.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

/// List, parse, and render every `*.json` artifact in `data_dir`.
///
/// The listing is non-recursive and sorted by filename so upload order is
/// deterministic. An empty directory yields an empty vector; a missing
/// directory is an error. Malformed JSON propagates rather than being
/// skipped, because a broken artifact means the conversion step needs to be
/// rerun before syncing.
pub fn discover_documents(data_dir: &Path) -> Result<Vec<RenderedDocument>, DiscoverError> {
    if !data_dir.is_dir() {
        return Err(DiscoverError::DirectoryNotFound(data_dir.to_path_buf()));
    }

    let entries = fs::read_dir(data_dir).map_err(|source| DiscoverError::Io {
        path: data_dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let raw = fs::read_to_string(&path).map_err(|source| DiscoverError::Io {
            path: path.clone(),
            source,
        })?;
        let value: Value = serde_json::from_str(&raw).map_err(|source| DiscoverError::Json {
            path: path.clone(),
            source,
        })?;
        let payload = DocumentPayload::from_value(value);

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let document_id = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().replace(' ', "_"))
            .unwrap_or_default();

        documents.push(RenderedDocument {
            document_id,
            text: render_document_summary(&filename, &payload),
        });
    }

    Ok(documents)
}
