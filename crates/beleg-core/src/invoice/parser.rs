//! Invoice parser: runs the field extractors and applies the review policy.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::models::invoice::ParsedInvoice;
use crate::pdf::{PdfTextSource, TextSource};

use super::rules::{
    extract_client_name, extract_invoice_date, extract_invoice_number, extract_total,
    FieldExtraction,
};

/// Deterministic invoice parser.
///
/// Owns the text-source capability that turns document bytes into a text
/// layer; everything downstream of that is pure computation over the text.
pub struct InvoiceParser {
    text_source: Box<dyn TextSource>,
}

impl InvoiceParser {
    /// Create a parser with an injected text source.
    pub fn new(text_source: Box<dyn TextSource>) -> Self {
        Self { text_source }
    }

    /// Parse an uploaded document.
    ///
    /// Documents without a usable text layer (scans, corrupt files, empty
    /// uploads) short-circuit to the all-null record flagged for review;
    /// the field extractors never see empty input.
    pub fn parse(&self, document: &[u8]) -> ParsedInvoice {
        let text = self
            .text_source
            .extract_text(document)
            .filter(|text| !text.trim().is_empty());

        match text {
            Some(text) => self.parse_text(&text),
            None => {
                debug!("document has no usable text layer, flagging for review");
                ParsedInvoice::review_required()
            }
        }
    }

    /// Parse an already-extracted text layer.
    ///
    /// The four extractors read the same immutable text and are
    /// independent of each other; only the review policy combines them.
    pub fn parse_text(&self, text: &str) -> ParsedInvoice {
        info!("parsing invoice from {} characters of text", text.len());

        let total = extract_total(text);
        let date = extract_invoice_date(text);
        let client = extract_client_name(text);
        let invoice_number = extract_invoice_number(text);

        let needs_review = review_decision(&total, &date, &client);
        debug!(
            "extraction done: total={:?} date={:?} client={:?} number={:?} needs_review={}",
            total.value, date.value, client.value, invoice_number, needs_review
        );

        ParsedInvoice {
            client_name: client.value,
            invoice_date: date.value,
            total_amount: total.value,
            invoice_number,
            needs_review,
        }
    }
}

impl Default for InvoiceParser {
    fn default() -> Self {
        Self::new(Box::new(PdfTextSource::new()))
    }
}

/// The review policy: a pure function of the three scored extraction
/// results. A missing or distrusted total, date or client name flags the
/// record; the invoice number never does.
fn review_decision(
    total: &FieldExtraction<String>,
    date: &FieldExtraction<NaiveDate>,
    client: &FieldExtraction<String>,
) -> bool {
    total.value.is_none()
        || !total.high_confidence
        || total.value.as_deref() == Some("0.00")
        || date.value.is_none()
        || !date.high_confidence
        || client.value.is_none()
        || !client.high_confidence
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Text source returning a fixed text layer, standing in for the
    /// document-to-text collaborator.
    struct FixedText(Option<&'static str>);

    impl TextSource for FixedText {
        fn extract_text(&self, _data: &[u8]) -> Option<String> {
            self.0.map(str::to_string)
        }
    }

    const WELL_FORMED: &str = "Acme Fabrication GmbH\n\
                               Rechnungsdatum: 02.01.2024\n\
                               Total: 540,00 EUR\n\
                               RE-2024-007";

    #[test]
    fn test_no_text_layer_short_circuits() {
        let parser = InvoiceParser::new(Box::new(FixedText(None)));
        assert_eq!(parser.parse(&[]), ParsedInvoice::review_required());
    }

    #[test]
    fn test_whitespace_only_text_short_circuits() {
        let parser = InvoiceParser::new(Box::new(FixedText(Some("  \n\t\n"))));
        assert_eq!(parser.parse(b"irrelevant"), ParsedInvoice::review_required());
    }

    #[test]
    fn test_well_formed_invoice() {
        let parser = InvoiceParser::new(Box::new(FixedText(Some(WELL_FORMED))));
        let parsed = parser.parse(b"irrelevant");

        assert_eq!(
            parsed,
            ParsedInvoice {
                client_name: Some("Acme Fabrication GmbH".to_string()),
                invoice_date: NaiveDate::from_ymd_opt(2024, 1, 2),
                total_amount: Some("540.00".to_string()),
                invoice_number: Some("RE-2024-007".to_string()),
                needs_review: false,
            }
        );
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let parser = InvoiceParser::default();
        let first = parser.parse_text(WELL_FORMED);
        let second = parser.parse_text(WELL_FORMED);
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_invoice_number_does_not_force_review() {
        let text = "Acme Fabrication GmbH\n\
                    Rechnungsdatum: 02.01.2024\n\
                    Total: 540,00 EUR";
        let parser = InvoiceParser::default();
        let parsed = parser.parse_text(text);

        assert_eq!(parsed.invoice_number, None);
        assert!(!parsed.needs_review);
    }

    #[test]
    fn test_low_confidence_total_forces_review() {
        let high = FieldExtraction::found("540.00".to_string(), true);
        let low_total = FieldExtraction::found("540.00".to_string(), false);
        let date = FieldExtraction::found(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), true);

        assert!(review_decision(&low_total, &date, &high));
        assert!(!review_decision(&high, &date, &high));
    }

    #[test]
    fn test_zero_total_forces_review() {
        let zero = FieldExtraction::found("0.00".to_string(), true);
        let date = FieldExtraction::found(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), true);
        let client = FieldExtraction::found("Acme Fabrication GmbH".to_string(), true);

        assert!(review_decision(&zero, &date, &client));
    }

    #[test]
    fn test_missing_fields_force_review() {
        let total = FieldExtraction::found("540.00".to_string(), true);
        let date = FieldExtraction::found(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), true);
        let client = FieldExtraction::found("Acme Fabrication GmbH".to_string(), true);

        assert!(review_decision(&FieldExtraction::none(), &date, &client));
        assert!(review_decision(&total, &FieldExtraction::none(), &client));
        assert!(review_decision(&total, &date, &FieldExtraction::none()));
    }
}
