//! OpenAI vector store integration.
//!
//! Thin HTTP wrapper over the two endpoints the sync needs: file upload and
//! vector store attachment, plus the status poll that makes the attachment
//! durable before the next document is sent.

mod client;
mod types;

pub use client::VectorStoreClient;
pub use types::{VectorStoreError, VectorStoreFile};
