//! Presentation extraction: per-slide text from `ppt/slides/slideN.xml`.

use std::path::Path;
use std::sync::OnceLock;

use quick_xml::Reader;
use quick_xml::events::Event;
use regex::Regex;

use super::{ExtractError, base_name, open_archive, read_entry};
use crate::document::{ExtractedDocument, Slide};

static SLIDE_ENTRY: OnceLock<Regex> = OnceLock::new();

fn slide_entry_pattern() -> &'static Regex {
    SLIDE_ENTRY.get_or_init(|| {
        Regex::new(r"^ppt/slides/slide(\d+)\.xml$").expect("slide entry pattern is valid")
    })
}

/// Extract slide text from a `.pptx` container.
///
/// Slides are ordered by the numeric index in the part name, not by the
/// archive's listing order, so `slide10.xml` sorts after `slide2.xml`.
pub(super) fn extract_pptx(path: &Path) -> Result<ExtractedDocument, ExtractError> {
    let mut archive = open_archive(path)?;

    let mut entries: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| {
            let captures = slide_entry_pattern().captures(name)?;
            let index: u32 = captures[1].parse().ok()?;
            Some((index, name.to_string()))
        })
        .collect();
    entries.sort_by_key(|(index, _)| *index);

    let mut slides = Vec::with_capacity(entries.len());
    for (slide_number, entry_name) in entries {
        let xml = read_entry(&mut archive, path, &entry_name)?;
        let text = parse_slide_xml(path, &xml)?;
        slides.push(Slide { slide_number, text });
    }

    Ok(ExtractedDocument::Pptx {
        file: base_name(path),
        slides,
    })
}

/// Collect every non-empty `a:t` text node in the slide, in document order.
///
/// The drawing-ml text element carries all visible slide text regardless of
/// the shape it sits in, so no shape-tree bookkeeping is needed.
fn parse_slide_xml(path: &Path, xml: &str) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut texts = Vec::new();
    let mut current = String::new();
    let mut in_text_node = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) if element.name().as_ref() == b"a:t" => {
                in_text_node = true;
            }
            Ok(Event::Text(text)) if in_text_node => {
                let content = text.unescape().map_err(|err| malformed(path, &err))?;
                current.push_str(&content);
            }
            Ok(Event::End(element)) if element.name().as_ref() == b"a:t" => {
                in_text_node = false;
                if !current.is_empty() {
                    texts.push(std::mem::take(&mut current));
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(malformed(path, &err)),
            Ok(_) => {}
        }
    }

    Ok(texts)
}

fn malformed(path: &Path, err: &quick_xml::Error) -> ExtractError {
    ExtractError::MalformedDocument {
        path: path.to_path_buf(),
        detail: err.to_string(),
    }
}
