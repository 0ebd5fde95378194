//! Keyword tables and regex pattern families for invoice field extraction.
//!
//! Locale keywords are plain data tables so that a new locale is an
//! additive edit, not a structural change.

use lazy_static::lazy_static;
use regex::Regex;

/// Keywords that label a total amount (mixed DE/EN).
pub const TOTAL_KEYWORDS: &[&str] = &[
    "total",
    "gesamt",
    "summe",
    "amount due",
    "zu zahlender betrag",
    "endbetrag",
    "rechnungsbetrag",
];

/// Keywords that label the invoice date (mixed DE/EN, colon variants
/// covered by substring matching).
pub const DATE_KEYWORDS: &[&str] = &["invoice date", "rechnungsdatum", "datum", "date"];

/// Substrings that disqualify a top-section line as a client name.
pub const CLIENT_EXCLUDE_KEYWORDS: &[&str] = &["ust-id", "steuernummer", "rechnung", "invoice"];

lazy_static! {
    // Monetary token families, tried in order within a keyword window.
    // The currency-anchored families accept integer amounts; the bare
    // family requires an explicit decimal part so digit runs from invoice
    // numbers or quantities nearby do not become candidates.
    pub static ref AMOUNT_EUR_SYMBOL_PREFIX: Regex = Regex::new(
        r"€\s*(\d{1,3}(?:[.,\s]?\d{3})*(?:[.,]\d{2})?)"
    ).unwrap();

    pub static ref AMOUNT_EUR_SYMBOL_SUFFIX: Regex = Regex::new(
        r"(\d{1,3}(?:[.,\s]?\d{3})*(?:[.,]\d{2})?)\s*€"
    ).unwrap();

    pub static ref AMOUNT_EUR_CODE_PREFIX: Regex = Regex::new(
        r"(?i)\bEUR\s*(\d{1,3}(?:[.,\s]?\d{3})*(?:[.,]\d{2})?)"
    ).unwrap();

    pub static ref AMOUNT_EUR_CODE_SUFFIX: Regex = Regex::new(
        r"(?i)(\d{1,3}(?:[.,\s]?\d{3})*(?:[.,]\d{2})?)\s*EUR\b"
    ).unwrap();

    pub static ref AMOUNT_BARE: Regex = Regex::new(
        r"\b(\d{1,3}(?:[.,\s]?\d{3})*[.,]\d{2})\b"
    ).unwrap();

    // Date shapes: DD.MM.YYYY, YYYY-MM-DD, DD/MM/YYYY
    pub static ref DATE_DMY_DOT: Regex = Regex::new(
        r"\b(\d{1,2})\.(\d{1,2})\.(\d{4})\b"
    ).unwrap();

    pub static ref DATE_YMD_DASH: Regex = Regex::new(
        r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b"
    ).unwrap();

    pub static ref DATE_DMY_SLASH: Regex = Regex::new(
        r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b"
    ).unwrap();

    // Client name exclusion shapes
    pub static ref PURE_DIGITS: Regex = Regex::new(r"^\d+$").unwrap();

    pub static ref VAT_ID_SHAPE: Regex = Regex::new(r"^[A-Za-z]{2}\d+$").unwrap();

    pub static ref POSTAL_CODE_GROUP: Regex = Regex::new(r"\b\d{5}\b").unwrap();

    pub static ref INVOICE_NUMBER_SHAPE: Regex = Regex::new(r"^\d+[-/]\d+$").unwrap();

    // Invoice number patterns. The labeled suffix must contain at least
    // one digit, otherwise word prefixes like "Rechnungsdatum" would
    // surrender their tail as a number.
    pub static ref INVOICE_NUMBER_LABELED: Regex = Regex::new(
        r"(?i)\b(?:rechnungs?(?:[\s-]?(?:nummer|nr\.?))?|invoice(?:[\s-]?(?:number|no\.?|nr\.?))?|re|inv)[ \t:#.]*([0-9][A-Za-z0-9/-]*|[A-Za-z][A-Za-z0-9/-]*[0-9][A-Za-z0-9/-]*)"
    ).unwrap();

    pub static ref INVOICE_NUMBER_PREFIXED: Regex = Regex::new(
        r"\b[A-Za-z]{2,4}[-/]\d{4}[-/]\d+\b"
    ).unwrap();

    pub static ref INVOICE_NUMBER_YEAR_SEQ: Regex = Regex::new(
        r"\b\d{4}[-/]\d+\b"
    ).unwrap();
}

/// The monetary token families in the order they are tried.
pub fn amount_patterns() -> [&'static Regex; 5] {
    [
        &*AMOUNT_EUR_SYMBOL_PREFIX,
        &*AMOUNT_EUR_SYMBOL_SUFFIX,
        &*AMOUNT_EUR_CODE_PREFIX,
        &*AMOUNT_EUR_CODE_SUFFIX,
        &*AMOUNT_BARE,
    ]
}
