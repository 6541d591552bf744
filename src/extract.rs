//! PDF text extraction with a character ceiling and length floor.

use std::path::Path;

use lopdf::Document as PdfDocument;
use thiserror::Error;

/// Errors that can occur during text extraction.
///
/// All of them mean the same thing to the batch runner: this document yields
/// no usable text. The variants exist for logging.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to parse PDF: {0}")]
    Parse(#[from] lopdf::Error),

    #[error("PDF is encrypted")]
    Encrypted,

    #[error("no text could be extracted")]
    Empty,

    #[error("extracted text too short: {0} chars")]
    TooShort(usize),
}

/// Result of text extraction.
#[derive(Debug)]
pub struct ExtractedText {
    /// Extracted text, per-page chunks joined with newlines, trimmed and
    /// truncated to the configured ceiling.
    pub text: String,
    /// Total number of pages in the document, including pages never read.
    pub page_count: usize,
}

/// Page-wise PDF text extractor.
///
/// Stops reading pages as soon as the ceiling is reached, so a 400-page
/// report costs no more than the first few pages.
pub struct TextExtractor {
    max_chars: usize,
    min_chars: usize,
}

impl TextExtractor {
    pub fn new(max_chars: usize, min_chars: usize) -> Self {
        Self {
            max_chars,
            min_chars,
        }
    }

    /// Extract text from the PDF at `path`.
    ///
    /// Pages that fail to decode contribute nothing; scanned or image-only
    /// pages are common in this corpus and are not an error on their own.
    /// The result is an error when the file cannot be parsed at all or the
    /// usable text stays under the length floor.
    pub fn extract(&self, path: &Path) -> Result<ExtractedText, ExtractionError> {
        let doc = PdfDocument::load(path)?;
        if doc.is_encrypted() {
            return Err(ExtractionError::Encrypted);
        }

        let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
        let page_count = pages.len();

        let mut text = String::new();
        let mut chars = 0usize;
        for page in pages {
            if let Ok(page_text) = doc.extract_text(&[page]) {
                chars += page_text.chars().count() + 1;
                text.push_str(&page_text);
                text.push('\n');
            }
            if chars >= self.max_chars {
                break;
            }
        }

        let text = finalize(&text, self.max_chars, self.min_chars)?;
        Ok(ExtractedText { text, page_count })
    }
}

/// Truncate to the ceiling, trim, and enforce the length floor.
fn finalize(raw: &str, max_chars: usize, min_chars: usize) -> Result<String, ExtractionError> {
    let truncated: String = raw.chars().take(max_chars).collect();
    let trimmed = truncated.trim();
    let len = trimmed.chars().count();
    if len == 0 {
        return Err(ExtractionError::Empty);
    }
    if len < min_chars {
        return Err(ExtractionError::TooShort(len));
    }
    Ok(trimmed.to_string())
}
