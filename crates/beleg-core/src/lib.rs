//! Core library for deterministic invoice document parsing.
//!
//! This crate provides:
//! - PDF text layer extraction (lopdf + pdf-extract)
//! - Deterministic field extraction (client name, invoice date, total
//!   amount, invoice number) using positional heuristics, keyword
//!   proximity and regex pattern families - no model inference
//! - A review policy that folds per-field confidence into a single
//!   `needs_review` flag for the invoice-creation workflow

pub mod error;
pub mod invoice;
pub mod models;
pub mod pdf;

pub use error::PdfError;
pub use invoice::rules::FieldExtraction;
pub use invoice::InvoiceParser;
pub use models::invoice::ParsedInvoice;
pub use pdf::{PdfTextSource, TextSource};
