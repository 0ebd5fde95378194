//! CLI subcommands.

pub mod batch;
pub mod process;

use std::fs;
use std::path::Path;

use beleg_core::{InvoiceParser, ParsedInvoice};

/// Parse one input file.
///
/// PDFs go through the parser's text source; `.txt` files are treated as
/// an already-extracted text layer, for pipelines that run their own
/// document-to-text step.
pub(crate) fn parse_file(parser: &InvoiceParser, path: &Path) -> anyhow::Result<ParsedInvoice> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => Ok(parser.parse(&fs::read(path)?)),
        "txt" => Ok(parser.parse_text(&fs::read_to_string(path)?)),
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}
