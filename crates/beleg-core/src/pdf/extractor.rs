//! PDF text layer extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use super::{Result, TextSource};
use crate::error::PdfError;

/// Text source for PDF documents.
///
/// Uses lopdf to validate the document structure (and to decrypt PDFs that
/// carry empty-password encryption, which pdf-extract cannot read), then
/// pdf-extract for the text layer itself.
pub struct PdfTextSource;

impl PdfTextSource {
    /// Create a new PDF text source.
    pub fn new() -> Self {
        Self
    }

    /// Extract the text layer, reporting why extraction failed.
    ///
    /// Callers that only care about presence/absence of text should go
    /// through the [`TextSource`] impl instead.
    pub fn extract(&self, data: &[u8]) -> Result<String> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        let raw_data = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes
            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }
        debug!("loaded PDF with {} pages", page_count);

        pdf_extract::extract_text_from_mem(&raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

impl Default for PdfTextSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSource for PdfTextSource {
    fn extract_text(&self, data: &[u8]) -> Option<String> {
        match self.extract(data) {
            Ok(text) => Some(text),
            Err(e) => {
                debug!("no text layer: {}", e);
                None
            }
        }
    }
}
