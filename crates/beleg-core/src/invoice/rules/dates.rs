//! Invoice date extraction.

use chrono::NaiveDate;
use tracing::debug;

use super::patterns::{DATE_DMY_DOT, DATE_DMY_SLASH, DATE_KEYWORDS, DATE_YMD_DASH};
use super::{keyword_window, FieldExtraction};

/// Extract the most likely invoice date from invoice text.
///
/// Dates found near a date keyword are trusted; a date found anywhere else
/// in the document is returned but flagged low confidence, since it may be
/// a delivery or due date instead.
pub fn extract_invoice_date(text: &str) -> FieldExtraction<NaiveDate> {
    let lines: Vec<&str> = text.lines().collect();

    // Keyword pass: date-labelled lines and their next two lines.
    for (index, line) in lines.iter().enumerate() {
        let lowered = line.to_lowercase();
        if !DATE_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
            continue;
        }

        for window_line in keyword_window(&lines, index) {
            if let Some(date) = first_valid_date(window_line) {
                debug!("date {} anchored to keyword line {}", date, index);
                return FieldExtraction::found(date, true);
            }
        }
    }

    // Fallback pass: any date shape anywhere in the text.
    for line in &lines {
        if let Some(date) = first_valid_date(line) {
            debug!("date {} found off-keyword", date);
            return FieldExtraction::found(date, false);
        }
    }

    FieldExtraction::none()
}

/// First structurally valid date on a line, trying the three supported
/// shapes in order: DD.MM.YYYY, YYYY-MM-DD, DD/MM/YYYY.
fn first_valid_date(line: &str) -> Option<NaiveDate> {
    for caps in DATE_DMY_DOT.captures_iter(line) {
        if let Some(date) = build_date(&caps[3], &caps[2], &caps[1]) {
            return Some(date);
        }
    }

    for caps in DATE_YMD_DASH.captures_iter(line) {
        if let Some(date) = build_date(&caps[1], &caps[2], &caps[3]) {
            return Some(date);
        }
    }

    for caps in DATE_DMY_SLASH.captures_iter(line) {
        if let Some(date) = build_date(&caps[3], &caps[2], &caps[1]) {
            return Some(date);
        }
    }

    None
}

/// Build a calendar date, rejecting impossible dates (month 13, Feb 30)
/// and years outside 2000-2100.
fn build_date(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    let year: i32 = year.parse().ok()?;
    if !(2000..=2100).contains(&year) {
        return None;
    }

    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}
