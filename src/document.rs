//! Data model for extracted documents and their on-disk JSON shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Text extracted from one OOXML container, discriminated by the `type` tag.
///
/// This is the shape serialized to the per-document `.json` artifact: the
/// `file` field holds only the base filename of the source document, and
/// empty runs or text nodes never appear in the sequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ExtractedDocument {
    /// Word-processing document: one entry per non-empty paragraph.
    Docx {
        /// Base filename of the source `.docx`.
        #[serde(default)]
        file: String,
        /// Paragraph texts in document order.
        #[serde(default)]
        paragraphs: Vec<String>,
    },
    /// Presentation: one entry per slide, in numeric slide order.
    Pptx {
        /// Base filename of the source `.pptx`.
        #[serde(default)]
        file: String,
        /// Slides ordered by their numeric index.
        #[serde(default)]
        slides: Vec<Slide>,
    },
}

/// Text content of a single presentation slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// Numeric index taken from the slide part's filename.
    pub slide_number: u32,
    /// Non-empty text nodes found in the slide, in document order.
    #[serde(default)]
    pub text: Vec<String>,
}

/// A JSON artifact read back from disk at sync time.
///
/// Artifacts written by the extractor always match [`ExtractedDocument`], but
/// rendering must not crash on foreign or hand-edited payloads, so anything
/// that fails the tagged decode is kept as raw JSON and rendered as a dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentPayload {
    /// Payload matching one of the known document shapes.
    Known(ExtractedDocument),
    /// Unrecognized payload preserved verbatim for the fallback rendering.
    Other(Value),
}

impl DocumentPayload {
    /// Classify a raw JSON value, downgrading unknown shapes to [`Self::Other`].
    pub fn from_value(value: Value) -> Self {
        match serde_json::from_value::<ExtractedDocument>(value.clone()) {
            Ok(document) => Self::Known(document),
            Err(_) => Self::Other(value),
        }
    }

    /// Value of the `type` discriminator, or `"unknown"` when absent.
    pub fn type_label(&self) -> &str {
        match self {
            Self::Known(ExtractedDocument::Docx { .. }) => "docx",
            Self::Known(ExtractedDocument::Pptx { .. }) => "pptx",
            Self::Other(value) => value
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("unknown"),
        }
    }
}
