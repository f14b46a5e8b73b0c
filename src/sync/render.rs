//! Flattening of JSON artifacts into upload-ready text blobs.

use crate::document::{DocumentPayload, ExtractedDocument};

/// A document flattened to text and ready for upload.
///
/// Computed on demand at sync time and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    /// Identifier derived from the artifact filename (spaces become underscores).
    pub document_id: String,
    /// Header plus type-specific body.
    pub text: String,
}

/// Produce the text blob for one artifact.
///
/// The header names the artifact and its document type; the body flattens
/// the payload. Unknown payloads fall back to a pretty-printed JSON dump so
/// that a foreign artifact degrades to noise in the store instead of
/// aborting the sync.
pub fn render_document_summary(filename: &str, payload: &DocumentPayload) -> String {
    let doc_type = payload.type_label();
    let header = format!("# Source: {filename}\nType: {doc_type}\n");

    let body = match payload {
        DocumentPayload::Known(ExtractedDocument::Docx { paragraphs, .. }) => {
            paragraphs.join("\n")
        }
        DocumentPayload::Known(ExtractedDocument::Pptx { slides, .. }) => slides
            .iter()
            .map(|slide| format!("Slide {}\n{}", slide.slide_number, slide.text.join("\n")))
            .collect::<Vec<_>>()
            .join("\n\n"),
        DocumentPayload::Other(value) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
    };

    header + &body
}
