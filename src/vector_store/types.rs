//! Shared types used by the vector store client.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors returned while interacting with the OpenAI vector store API.
#[derive(Debug, Error)]
pub enum VectorStoreError {
    /// Base URL failed to parse or normalize.
    #[error("Invalid API base URL: {0}")]
    InvalidUrl(String),
    /// HTTP layer failed before receiving a response.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The API responded with an unexpected status code.
    #[error("Unexpected API response ({status}): {body}")]
    UnexpectedStatus {
        /// HTTP status returned by the API.
        status: StatusCode,
        /// Body payload associated with the failing response.
        body: String,
    },
    /// The store accepted the file but ingestion ended in a terminal failure.
    #[error("File {file_id} ended ingestion with status '{status}'")]
    Ingest {
        /// Identifier of the uploaded file.
        file_id: String,
        /// Terminal status reported by the store.
        status: String,
    },
    /// Staging the upload payload on disk failed.
    #[error("Failed to stage upload: {0}")]
    Io(#[from] std::io::Error),
}

/// A file attached to a vector store, as reported by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct VectorStoreFile {
    /// Identifier of the file within the API.
    pub id: String,
    /// Ingestion status (`in_progress`, `completed`, `failed`, `cancelled`).
    pub status: String,
}

#[derive(Deserialize)]
pub(crate) struct FileObject {
    pub(crate) id: String,
}
