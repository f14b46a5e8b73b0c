//! Word-processing extraction: paragraphs from `word/document.xml`.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;

use super::{ExtractError, base_name, open_archive, read_entry};
use crate::document::ExtractedDocument;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extract paragraph text from a `.docx` container.
pub(super) fn extract_docx(path: &Path) -> Result<ExtractedDocument, ExtractError> {
    let mut archive = open_archive(path)?;
    let xml = read_entry(&mut archive, path, DOCUMENT_PART)?;
    let paragraphs = parse_document_xml(path, &xml)?;
    Ok(ExtractedDocument::Docx {
        file: base_name(path),
        paragraphs,
    })
}

/// Walk the document XML, concatenating the `w:t` runs of each `w:p` element.
///
/// Paragraphs whose runs are all empty are omitted. Text outside run-text
/// elements (indentation, properties) is ignored.
fn parse_document_xml(path: &Path, xml: &str) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) if element.name().as_ref() == b"w:t" => {
                in_run_text = true;
            }
            Ok(Event::Text(text)) if in_run_text => {
                let content = text.unescape().map_err(|err| malformed(path, &err))?;
                current.push_str(&content);
            }
            Ok(Event::End(element)) => match element.name().as_ref() {
                b"w:t" => in_run_text = false,
                b"w:p" => {
                    if !current.is_empty() {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(err) => return Err(malformed(path, &err)),
            Ok(_) => {}
        }
    }

    Ok(paragraphs)
}

fn malformed(path: &Path, err: &quick_xml::Error) -> ExtractError {
    ExtractError::MalformedDocument {
        path: path.to_path_buf(),
        detail: err.to_string(),
    }
}
