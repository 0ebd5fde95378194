//! Error types for the beleg-core library.
//!
//! Only the PDF text-source layer can fail. Field extraction itself never
//! errors: a value the heuristics distrust is reported through the
//! `needs_review` flag, and a value the patterns cannot find is `None`.

use thiserror::Error;

/// Errors raised while reading a PDF document.
///
/// These never cross the parser boundary: the [`TextSource`] implementation
/// converts every failure into a missing text layer before the invoice
/// parser sees it.
///
/// [`TextSource`]: crate::pdf::TextSource
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),
}
