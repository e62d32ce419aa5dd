//! PDF text extraction.
//!
//! Turns a raw PDF payload into plain text, validating structural
//! well-formedness along the way. Extraction is pure with respect to the
//! input bytes: the same payload always yields the same text, regardless
//! of call order or concurrent extractions elsewhere.

pub mod error;


pub use error::ExtractError;

use lopdf::Document;
use tracing::debug;

/// Magic signature every PDF payload must start with.
pub const PDF_MAGIC: &[u8] = b"%PDF";

/// Plain text recovered from a document.
///
/// Invariant: never empty or whitespace-only. Absence of extractable text
/// is [`ExtractError::NoExtractableText`], not an empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText(String);

impl ExtractedText {
    fn new(text: String) -> Result<Self, ExtractError> {
        if text.trim().is_empty() {
            return Err(ExtractError::NoExtractableText);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for ExtractedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExtractedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extracts plain text from PDF payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Recovers the plain text of `payload`.
    ///
    /// The payload must carry the `%PDF` signature and parse into at least
    /// one page; both checks fail with [`ExtractError::MalformedDocument`].
    /// Pages whose text is empty after trimming are skipped (image-only
    /// pages legitimately yield no text). Retained page texts are joined
    /// in page order with a single space. If nothing remains, the document
    /// is rejected with [`ExtractError::NoExtractableText`].
    pub fn extract(&self, payload: &[u8]) -> Result<ExtractedText, ExtractError> {
        if !payload.starts_with(PDF_MAGIC) {
            return Err(ExtractError::MalformedDocument {
                reason: "missing %PDF signature".to_string(),
            });
        }

        let document = Document::load_mem(payload).map_err(|e| ExtractError::MalformedDocument {
            reason: e.to_string(),
        })?;

        let pages = document.get_pages();
        if pages.is_empty() {
            return Err(ExtractError::MalformedDocument {
                reason: "document has no pages".to_string(),
            });
        }

        let mut page_texts = Vec::with_capacity(pages.len());
        for page_number in pages.keys() {
            let text = document.extract_text(&[*page_number]).map_err(|e| {
                ExtractError::MalformedDocument {
                    reason: format!("page {page_number}: {e}"),
                }
            })?;

            let trimmed = text.trim();
            if trimmed.is_empty() {
                debug!(page = *page_number, "page yielded no text, skipping");
                continue;
            }
            page_texts.push(trimmed.to_string());
        }

        ExtractedText::new(page_texts.join(" "))
    }
}
