#![deny(missing_docs)]

//! Core library for the docsync toolchain.
//!
//! Two surfaces share this crate: the `convert-docs` binary, which extracts
//! text from Office Open XML containers into JSON artifacts, and the
//! `docsync` binary, which flattens those artifacts and pushes them into
//! per-account OpenAI vector stores.

/// Compiled-in account registry.
pub mod accounts;
/// Environment layering and sync configuration.
pub mod config;
/// Extracted document data model.
pub mod document;
/// OOXML text extraction and batch conversion.
pub mod extract;
/// Structured logging and tracing setup.
pub mod logging;
/// Artifact discovery, rendering, and upload orchestration.
pub mod sync;
/// OpenAI vector store integration.
pub mod vector_store;
