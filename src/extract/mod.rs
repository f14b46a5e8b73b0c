//! Text extraction from OOXML containers.
//!
//! Both supported formats are ZIP archives holding XML parts. Extraction is
//! deliberately narrow: it reads the single conventional content path of each
//! format (`word/document.xml` for word-processing documents, the
//! `ppt/slides/slideN.xml` parts for presentations) and collects text nodes
//! in document order. Styling, tables, notes, and embedded media are out of
//! scope.

mod convert;
mod docx;
mod pptx;

pub use convert::{ConvertError, ConvertSummary, convert_directory};

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::document::ExtractedDocument;

/// Errors raised while extracting text from a single container.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The file extension is neither `.docx` nor `.pptx`.
    #[error("Unsupported file type: {path}")]
    UnsupportedType {
        /// Path of the rejected file.
        path: PathBuf,
    },
    /// The container is not a readable ZIP archive.
    #[error("Corrupt archive {path}: {source}")]
    CorruptArchive {
        /// Path of the unreadable container.
        path: PathBuf,
        /// Underlying archive error.
        #[source]
        source: ZipError,
    },
    /// A required part is missing or its XML does not parse.
    #[error("Malformed document {path}: {detail}")]
    MalformedDocument {
        /// Path of the offending container.
        path: PathBuf,
        /// Description of what failed inside the container.
        detail: String,
    },
    /// Filesystem-level read failure.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Container formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Word-processing container (`.docx`).
    Docx,
    /// Presentation container (`.pptx`).
    Pptx,
}

/// Classify a path by its extension, case-insensitively.
pub fn detect_kind(path: &Path) -> Option<DocumentKind> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "docx" => Some(DocumentKind::Docx),
        "pptx" => Some(DocumentKind::Pptx),
        _ => None,
    }
}

/// Extract the text content of one `.docx` or `.pptx` container.
///
/// The only side effect is reading the input file. Errors are never retried;
/// the batch walk in [`convert_directory`] is responsible for isolating them.
pub fn extract(path: &Path) -> Result<ExtractedDocument, ExtractError> {
    match detect_kind(path) {
        Some(DocumentKind::Docx) => docx::extract_docx(path),
        Some(DocumentKind::Pptx) => pptx::extract_pptx(path),
        None => Err(ExtractError::UnsupportedType {
            path: path.to_path_buf(),
        }),
    }
}

/// Open a container as a ZIP archive, mapping failures to the extract taxonomy.
fn open_archive(path: &Path) -> Result<ZipArchive<File>, ExtractError> {
    let file = File::open(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ZipArchive::new(file).map_err(|source| ExtractError::CorruptArchive {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a named archive entry into a string.
///
/// A missing entry is a malformed document rather than a corrupt archive:
/// the ZIP itself opened fine but does not carry the conventional part.
fn read_entry(
    archive: &mut ZipArchive<File>,
    path: &Path,
    name: &str,
) -> Result<String, ExtractError> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => {
            return Err(ExtractError::MalformedDocument {
                path: path.to_path_buf(),
                detail: format!("missing {name}"),
            });
        }
        Err(source) => {
            return Err(ExtractError::CorruptArchive {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let mut content = String::new();
    entry
        .read_to_string(&mut content)
        .map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(content)
}

/// Base filename of a container, used for the `file` field of the artifact.
fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}


#[cfg(test)]
mod tests {
    use super::test_fixtures::{docx_body, slide_body, write_archive};
    use super::*;
    use crate::document::{ExtractedDocument, Slide};

    #[test]
    fn detect_kind_is_case_insensitive() {
        assert_eq!(detect_kind(Path::new("a/b/Report.DOCX")), Some(DocumentKind::Docx));
        assert_eq!(detect_kind(Path::new("Deck.PpTx")), Some(DocumentKind::Pptx));
        assert_eq!(detect_kind(Path::new("notes.txt")), None);
        assert_eq!(detect_kind(Path::new("no_extension")), None);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "plain text").expect("write");
        assert!(matches!(
            extract(&path),
            Err(ExtractError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn garbage_bytes_are_a_corrupt_archive() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, b"this is not a zip archive").expect("write");
        assert!(matches!(
            extract(&path),
            Err(ExtractError::CorruptArchive { .. })
        ));
    }

    #[test]
    fn docx_without_document_part_is_malformed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("empty.docx");
        write_archive(&path, &[("word/other.xml", "<w:document/>")]);
        match extract(&path) {
            Err(ExtractError::MalformedDocument { detail, .. }) => {
                assert!(detail.contains("word/document.xml"));
            }
            other => panic!("expected malformed document, got {other:?}"),
        }
    }

    #[test]
    fn docx_extraction_keeps_order_and_drops_empty_paragraphs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("report.docx");
        write_archive(
            &path,
            &[(
                "word/document.xml",
                &docx_body(&[&["Intro ", "paragraph"], &[], &[""], &["Second"]]),
            )],
        );

        let document = extract(&path).expect("extract");
        assert_eq!(
            document,
            ExtractedDocument::Docx {
                file: "report.docx".to_string(),
                paragraphs: vec!["Intro paragraph".to_string(), "Second".to_string()],
            }
        );
    }

    #[test]
    fn pptx_slides_sort_numerically_not_lexicographically() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("deck.pptx");
        // Archive listing order puts slide10 before slide2 on purpose.
        write_archive(
            &path,
            &[
                ("ppt/slides/slide10.xml", &slide_body(&["Closing"])),
                ("ppt/slides/slide2.xml", &slide_body(&["Agenda", "Goals"])),
                ("ppt/slides/slide1.xml", &slide_body(&["Title"])),
                ("ppt/slideLayouts/slideLayout1.xml", &slide_body(&["Layout"])),
            ],
        );

        let document = extract(&path).expect("extract");
        assert_eq!(
            document,
            ExtractedDocument::Pptx {
                file: "deck.pptx".to_string(),
                slides: vec![
                    Slide {
                        slide_number: 1,
                        text: vec!["Title".to_string()],
                    },
                    Slide {
                        slide_number: 2,
                        text: vec!["Agenda".to_string(), "Goals".to_string()],
                    },
                    Slide {
                        slide_number: 10,
                        text: vec!["Closing".to_string()],
                    },
                ],
            }
        );
    }
}
