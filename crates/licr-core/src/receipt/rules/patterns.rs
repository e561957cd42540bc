//! Marker phrases and regex templates for LIC receipt extraction.
//!
//! All templates are written against lower-cased text.

use lazy_static::lazy_static;
use regex::Regex;

/// Phrases that identify an LIC premium receipt.
pub const LIC_MARKERS: [&str; 6] = [
    "life insurance corporation",
    "lic of india",
    "premium receipt",
    "policy number",
    "premium paid",
    "receipt no",
];

lazy_static! {
    // Labelled amounts, optionally followed by a currency symbol
    pub static ref PREMIUM_AMOUNT: Regex = Regex::new(
        r"premium[:\s]+(?:rs\.?|₹)?\s*([0-9,]+\.?[0-9]*)"
    ).unwrap();

    pub static ref LABELLED_AMOUNT: Regex = Regex::new(
        r"amount[:\s]+(?:rs\.?|₹)?\s*([0-9,]+\.?[0-9]*)"
    ).unwrap();

    pub static ref PAID_AMOUNT: Regex = Regex::new(
        r"paid[:\s]+(?:rs\.?|₹)?\s*([0-9,]+\.?[0-9]*)"
    ).unwrap();

    // Bare currency symbols
    pub static ref RUPEE_SIGN_AMOUNT: Regex = Regex::new(
        r"₹\s*([0-9,]+\.?[0-9]*)"
    ).unwrap();

    pub static ref RS_AMOUNT: Regex = Regex::new(
        r"\brs\.?\s*([0-9,]+\.?[0-9]*)"
    ).unwrap();

    // Labelled numeric dates
    pub static ref DATE_LABELLED: Regex = Regex::new(
        r"date[:\s]+(\d{1,2}[-/]\d{1,2}[-/]\d{2,4})"
    ).unwrap();

    pub static ref DATED_LABELLED: Regex = Regex::new(
        r"dated[:\s]+(\d{1,2}[-/]\d{1,2}[-/]\d{2,4})"
    ).unwrap();

    pub static ref RECEIPT_DATE_LABELLED: Regex = Regex::new(
        r"receipt date[:\s]+(\d{1,2}[-/]\d{1,2}[-/]\d{2,4})"
    ).unwrap();

    // Unlabelled dates
    pub static ref NUMERIC_DATE: Regex = Regex::new(
        r"\b(\d{1,2}[-/]\d{1,2}[-/]\d{2,4})\b"
    ).unwrap();

    pub static ref TEXTUAL_DATE: Regex = Regex::new(
        r"\b(\d{1,2}\s+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\w*\s+\d{2,4})\b"
    ).unwrap();

    // Component splitters used by the lenient date parser
    pub static ref NUMERIC_DATE_PARTS: Regex = Regex::new(
        r"^(\d{1,2})[-/](\d{1,2})[-/](\d{2,4})$"
    ).unwrap();

    pub static ref TEXTUAL_DATE_PARTS: Regex = Regex::new(
        r"^(\d{1,2})\s+([a-z]+)\s+(\d{2,4})$"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_are_lowercase() {
        for marker in LIC_MARKERS {
            assert_eq!(marker, marker.to_lowercase());
        }
    }

    #[test]
    fn test_rs_requires_word_start() {
        assert!(RS_AMOUNT.captures("years 2023").is_none());
        assert_eq!(&RS_AMOUNT.captures("paid rs.1,500").unwrap()[1], "1,500");
    }

    #[test]
    fn test_numeric_date_ignores_iso_fragments() {
        assert!(NUMERIC_DATE.captures("2023-08-15").is_none());
        assert_eq!(&NUMERIC_DATE.captures("on 15/08/2023.").unwrap()[1], "15/08/2023");
    }

    #[test]
    fn test_textual_date_captures_whole_date() {
        let caps = TEXTUAL_DATE.captures("paid on 5 september 2023 at").unwrap();
        assert_eq!(&caps[1], "5 september 2023");
    }
}
