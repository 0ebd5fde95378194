//! Client name extraction.

use tracing::debug;

use super::patterns::{
    CLIENT_EXCLUDE_KEYWORDS, DATE_DMY_DOT, INVOICE_NUMBER_SHAPE, POSTAL_CODE_GROUP, PURE_DIGITS,
    VAT_ID_SHAPE,
};
use super::{Candidate, FieldExtraction};

/// How many non-blank lines from the top of the document are considered.
const TOP_SECTION_LINES: usize = 20;

/// Extract the most likely counterparty name from invoice text.
///
/// Invoices conventionally place the counterparty near the top, so only
/// the top section is searched. Lines that look like tax IDs, postal
/// codes, dates or invoice-number headers are excluded; of the remaining
/// lines the longest one wins, since full legal company names tend to be
/// longer than labels.
pub fn extract_client_name(text: &str) -> FieldExtraction<String> {
    let top_section: Vec<(usize, &str)> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(TOP_SECTION_LINES)
        .enumerate()
        .collect();

    let mut winner: Option<Candidate<&str>> = None;
    for &(index, line) in &top_section {
        if is_excluded(line) || !is_plausible_name(line) {
            continue;
        }

        let longer = winner
            .as_ref()
            .is_none_or(|w| line.chars().count() > w.value.chars().count());
        if longer {
            winner = Some(Candidate { value: line, line: index });
        }
    }

    let Some(winner) = winner else {
        return FieldExtraction::none();
    };

    debug!("client name candidate {:?} at line {}", winner.value, winner.line);

    // Favors names that are both substantial and near the very top.
    let length = winner.value.chars().count();
    let high_confidence = (10..=80).contains(&length) && winner.line < 5;

    FieldExtraction::found(winner.value.to_string(), high_confidence)
}

/// Lines that cannot be a counterparty name: IDs, postal codes, dates and
/// invoice headers.
fn is_excluded(line: &str) -> bool {
    let lowered = line.to_lowercase();

    CLIENT_EXCLUDE_KEYWORDS.iter().any(|kw| lowered.contains(kw))
        || PURE_DIGITS.is_match(line)
        || VAT_ID_SHAPE.is_match(line)
        || POSTAL_CODE_GROUP.is_match(line)
        || DATE_DMY_DOT.is_match(line)
        || INVOICE_NUMBER_SHAPE.is_match(line)
}

/// Length within bounds, at least one letter, at most 30% digits.
fn is_plausible_name(line: &str) -> bool {
    let length = line.chars().count();
    if !(3..=100).contains(&length) {
        return false;
    }
    if !line.chars().any(char::is_alphabetic) {
        return false;
    }

    let digits = line.chars().filter(char::is_ascii_digit).count();
    digits as f32 <= length as f32 * 0.3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_line_company_name() {
        let result = extract_client_name("Acme Fabrication GmbH\nMusterstraße 12\nBerlin");
        assert_eq!(result.value.as_deref(), Some("Acme Fabrication GmbH"));
        assert!(result.high_confidence);
    }

    #[test]
    fn test_vat_id_is_never_selected() {
        let result = extract_client_name("DE123456789");
        assert_eq!(result.value, None);

        let result = extract_client_name("DE123456789\nKurz AG");
        assert_eq!(result.value.as_deref(), Some("Kurz AG"));
    }

    #[test]
    fn test_id_and_header_lines_are_excluded() {
        let text = "Rechnung Nr. 2024-001\n\
                    12.03.2024\n\
                    10115 Berlin\n\
                    Steuernummer 12/345/67890\n\
                    Beispiel Handels GmbH & Co. KG";
        let result = extract_client_name(text);
        assert_eq!(result.value.as_deref(), Some("Beispiel Handels GmbH & Co. KG"));
    }

    #[test]
    fn test_longest_survivor_wins() {
        let result = extract_client_name("Angebot\nNorddeutsche Maschinenbau AG");
        assert_eq!(
            result.value.as_deref(),
            Some("Norddeutsche Maschinenbau AG")
        );
    }

    #[test]
    fn test_digit_heavy_line_is_rejected() {
        let result = extract_client_name("A1 2B 3C 4D 5E 6F");
        assert_eq!(result.value, None);
    }

    #[test]
    fn test_short_name_is_low_confidence() {
        let result = extract_client_name("Acme Co");
        assert_eq!(result.value.as_deref(), Some("Acme Co"));
        assert!(!result.high_confidence);
    }

    #[test]
    fn test_name_far_from_top_is_low_confidence() {
        let filler = "Eins\nZwei\nDrei\nVier\nFünf\n";
        let text = format!("{filler}Langenscheidt Verlagsgruppe");
        let result = extract_client_name(&text);
        assert_eq!(result.value.as_deref(), Some("Langenscheidt Verlagsgruppe"));
        assert!(!result.high_confidence);
    }

    #[test]
    fn test_only_top_section_is_searched() {
        let mut text = String::new();
        for _ in 0..TOP_SECTION_LINES {
            text.push_str("Zeile\n");
        }
        text.push_str("Weitumdieweltschifffahrtsgesellschaft mbH\n");
        let result = extract_client_name(&text);
        assert_eq!(result.value.as_deref(), Some("Zeile"));
        assert!(!result.high_confidence);
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        let result = extract_client_name("");
        assert_eq!(result.value, None);
        assert!(!result.high_confidence);
    }
}
