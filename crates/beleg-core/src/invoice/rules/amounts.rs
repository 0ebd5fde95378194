//! Total amount extraction.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::debug;

use super::patterns::{amount_patterns, TOTAL_KEYWORDS};
use super::{keyword_window, Candidate, FieldExtraction};

/// Extract the most likely total amount from invoice text.
///
/// Every line carrying a total keyword opens a window of itself plus the
/// next two lines; all monetary tokens found in those windows become
/// candidates and the largest one wins. Totals are normally the largest
/// figure near a "total" keyword, larger than subtotals or line items.
pub fn extract_total(text: &str) -> FieldExtraction<String> {
    let lines: Vec<&str> = text.lines().collect();
    let mut candidates: Vec<Candidate<Decimal>> = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let lowered = line.to_lowercase();
        if !TOTAL_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
            continue;
        }

        for (offset, window_line) in keyword_window(&lines, index).iter().enumerate() {
            for pattern in amount_patterns() {
                for caps in pattern.captures_iter(window_line) {
                    if let Some(value) = normalize_amount(&caps[1]) {
                        candidates.push(Candidate {
                            value,
                            line: index + offset,
                        });
                    }
                }
            }
        }
    }

    let Some(winner) = candidates.iter().max_by_key(|c| c.value) else {
        return FieldExtraction::none();
    };

    debug!(
        "picked total {} from line {} out of {} candidates",
        winner.value,
        winner.line,
        candidates.len()
    );

    // More than two candidates signals ambiguity (e.g. a restated
    // subtotal), so a value is returned but flagged for review.
    let high_confidence = candidates.len() <= 2 && winner.value >= Decimal::ONE;

    FieldExtraction::found(format!("{:.2}", winner.value), high_confidence)
}

/// Normalize a monetary token: strip whitespace, comma becomes dot, then a
/// strict numeric parse. Non-numeric and non-positive tokens are dropped.
fn normalize_amount(token: &str) -> Option<Decimal> {
    let normalized: String = token
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    let value = Decimal::from_str(&normalized).ok()?;
    (value > Decimal::ZERO).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_keyword_means_no_total() {
        let result = extract_total("Lieferung von Waren\n123,45\nVielen Dank");
        assert_eq!(result.value, None);
        assert!(!result.high_confidence);
    }

    #[test]
    fn test_euro_prefixed_amount() {
        let result = extract_total("Total: €123,45");
        assert_eq!(result.value.as_deref(), Some("123.45"));
        assert!(result.high_confidence);
    }

    #[test]
    fn test_eur_suffixed_amount() {
        let result = extract_total("Total: 540,00 EUR");
        assert_eq!(result.value.as_deref(), Some("540.00"));
        assert!(result.high_confidence);
    }

    #[test]
    fn test_amount_two_lines_below_keyword() {
        let result = extract_total("Zu zahlender Betrag:\n\n540,00 EUR");
        assert_eq!(result.value.as_deref(), Some("540.00"));
        assert!(result.high_confidence);
    }

    #[test]
    fn test_largest_candidate_wins_but_ambiguity_forces_review() {
        let text = "Summe netto: 100,00\nTotal: 200,00\nGesamt: 300,00";
        let result = extract_total(text);
        assert_eq!(result.value.as_deref(), Some("300.00"));
        assert!(!result.high_confidence);
    }

    #[test]
    fn test_sub_one_euro_total_is_low_confidence() {
        let result = extract_total("Total: €0,50");
        assert_eq!(result.value.as_deref(), Some("0.50"));
        assert!(!result.high_confidence);
    }

    #[test]
    fn test_zero_amount_is_discarded() {
        let result = extract_total("Total: 0,00 EUR");
        assert_eq!(result.value, None);
        assert!(!result.high_confidence);
    }

    #[test]
    fn test_dot_grouped_thousands_token_is_discarded() {
        // "1.234,56" normalizes to "1.234.56", which is not a number.
        let result = extract_total("Summe: 1.234,56 EUR");
        assert_eq!(result.value, None);
    }

    #[test]
    fn test_returned_total_is_fixed_point() {
        for text in [
            "Total: €123,45",
            "Gesamt: 99,90 €",
            "Amount due: EUR 7,00",
            "Endbetrag:\n1500,00",
        ] {
            let result = extract_total(text);
            let value = result.value.expect(text);
            assert!(
                value.chars().all(|c| c.is_ascii_digit() || c == '.'),
                "unexpected characters in {value}"
            );
            let (int_part, frac_part) = value.split_once('.').expect(text);
            assert!(!int_part.is_empty());
            assert_eq!(frac_part.len(), 2);
        }
    }

    #[test]
    fn test_normalize_amount() {
        assert_eq!(normalize_amount("123,45"), Decimal::from_str("123.45").ok());
        assert_eq!(normalize_amount("1 234,56"), Decimal::from_str("1234.56").ok());
        assert_eq!(normalize_amount("540"), Decimal::from_str("540").ok());
        assert_eq!(normalize_amount("1.234,56"), None);
        assert_eq!(normalize_amount("0,00"), None);
        assert_eq!(normalize_amount("abc"), None);
    }
}
