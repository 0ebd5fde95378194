//! The parsed invoice record consumed by the invoice-creation workflow.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Result of parsing one invoice document.
///
/// All fields are created fresh per parse call; there is no persistent
/// state behind this record. Serialized with camelCase keys and explicit
/// `null`s because the downstream RPC layer pre-fills a form from it and
/// treats a missing key and a null value differently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedInvoice {
    /// Counterparty name from the top section of the document.
    pub client_name: Option<String>,

    /// Invoice date. Always a real calendar date with year 2000-2100.
    pub invoice_date: Option<NaiveDate>,

    /// Total amount as a fixed-point string, `digits "." two-digits`.
    /// Never contains a currency symbol or thousands separator.
    pub total_amount: Option<String>,

    /// Invoice number, present or absent; never scored.
    pub invoice_number: Option<String>,

    /// Set when a human must verify the extracted fields before the
    /// invoice record is finalized. Computed only by the review policy.
    pub needs_review: bool,
}

impl ParsedInvoice {
    /// The all-null record returned when a document has no usable text
    /// layer. Always flagged for review.
    pub fn review_required() -> Self {
        Self {
            client_name: None,
            invoice_date: None,
            total_amount: None,
            invoice_number: None,
            needs_review: true,
        }
    }
}
