//! Document-to-text extraction.

mod extractor;

pub use extractor::PdfTextSource;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Capability that turns document bytes into a text layer.
///
/// `None` is the expected outcome for documents without an embedded text
/// layer (pure scans, corrupt files, empty uploads). Implementations must
/// swallow their own failures; the invoice parser only ever observes
/// "text" or "no text".
pub trait TextSource: Send + Sync {
    /// Extract the text layer from raw document bytes.
    fn extract_text(&self, data: &[u8]) -> Option<String>;
}
