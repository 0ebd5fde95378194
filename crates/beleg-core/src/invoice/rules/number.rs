//! Invoice number extraction.
//!
//! No confidence scoring here: the number is either a direct pattern match
//! or absent, and it never drives the review decision on its own.

use super::patterns::{
    INVOICE_NUMBER_LABELED, INVOICE_NUMBER_PREFIXED, INVOICE_NUMBER_YEAR_SEQ,
};

/// Extract an invoice number, trying the labeled pattern first, then the
/// lettered `RE-2024-001` shape, then the bare `2024-001` shape.
pub fn extract_invoice_number(text: &str) -> Option<String> {
    if let Some(caps) = INVOICE_NUMBER_LABELED.captures(text) {
        return Some(caps[1].to_string());
    }

    if let Some(m) = INVOICE_NUMBER_PREFIXED.find(text) {
        return Some(m.as_str().to_string());
    }

    INVOICE_NUMBER_YEAR_SEQ
        .find(text)
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_german_number() {
        assert_eq!(
            extract_invoice_number("Rechnungsnummer: 2024-001"),
            Some("2024-001".to_string())
        );
        assert_eq!(
            extract_invoice_number("Rechnung Nr. 42/2024"),
            Some("42/2024".to_string())
        );
    }

    #[test]
    fn test_labeled_english_number() {
        assert_eq!(
            extract_invoice_number("Invoice No: INV-2024-12"),
            Some("INV-2024-12".to_string())
        );
    }

    #[test]
    fn test_prefixed_shape_keeps_its_letters() {
        // "RE-2024-007" must come back whole, not as a keyword match that
        // strips the prefix.
        assert_eq!(
            extract_invoice_number("RE-2024-007"),
            Some("RE-2024-007".to_string())
        );
    }

    #[test]
    fn test_year_sequence_shape() {
        assert_eq!(
            extract_invoice_number("Beleg 2024/0815 vom Montag"),
            Some("2024/0815".to_string())
        );
    }

    #[test]
    fn test_date_label_is_not_a_number() {
        assert_eq!(extract_invoice_number("Rechnungsdatum: 15.03.2024"), None);
    }

    #[test]
    fn test_no_number_anywhere() {
        assert_eq!(extract_invoice_number("Acme Fabrication GmbH\nBerlin"), None);
    }
}
