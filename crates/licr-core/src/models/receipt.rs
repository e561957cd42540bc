//! Receipt extraction and validation result models.

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Format used for serialized submission dates (`2023-08-15T00:00:00`).
pub const ISO_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Marker appended to the text excerpt when the document was truncated.
pub const EXCERPT_MARKER: &str = "...";

/// Classified document type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    /// LIC premium receipt.
    LicReceipt,
    /// Anything else, including documents with too little signal.
    #[default]
    OtherDocument,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::LicReceipt => "LIC_RECEIPT",
            DocumentType::OtherDocument => "OTHER_DOCUMENT",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying and extracting one document.
///
/// Built once per extraction call by [`ExtractionReport::new`] and never
/// modified afterwards; the fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionReport {
    document_type: DocumentType,

    premium_amount: Option<Decimal>,

    /// ISO-8601 local date-time, `None` when no date could be parsed.
    submission_date: Option<String>,

    /// Leading excerpt of the raw text for diagnostics.
    raw_text: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

impl ExtractionReport {
    /// Assemble a report, serializing the date and cutting the excerpt to
    /// `excerpt_chars` characters.
    pub fn new(
        document_type: DocumentType,
        premium_amount: Option<Decimal>,
        submission_date: Option<NaiveDateTime>,
        raw_text: &str,
        excerpt_chars: usize,
        warnings: Vec<String>,
    ) -> Self {
        Self {
            document_type,
            premium_amount,
            submission_date: submission_date.map(|d| d.format(ISO_DATETIME_FORMAT).to_string()),
            raw_text: excerpt(raw_text, excerpt_chars),
            warnings,
        }
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    pub fn is_lic_receipt(&self) -> bool {
        self.document_type == DocumentType::LicReceipt
    }

    pub fn premium_amount(&self) -> Option<Decimal> {
        self.premium_amount
    }

    /// Submission date as the ISO-8601 string handed to period validation.
    pub fn submission_date(&self) -> Option<&str> {
        self.submission_date.as_deref()
    }

    /// Submission date parsed back into a date-time.
    pub fn submission_datetime(&self) -> Option<NaiveDateTime> {
        self.submission_date
            .as_deref()
            .and_then(|s| NaiveDateTime::parse_from_str(s, ISO_DATETIME_FORMAT).ok())
    }

    pub fn excerpt(&self) -> &str {
        &self.raw_text
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// First `max_chars` characters of `text`, with [`EXCERPT_MARKER`] appended
/// when anything was cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &text[..cut], EXCERPT_MARKER),
        None => text.to_string(),
    }
}

/// Outcome of checking a submission date against a financial year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub message: String,
}

impl ValidationResult {
    pub fn valid(message: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            message: message.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn test_excerpt_short_text_untouched() {
        assert_eq!(excerpt("short", 500), "short");
        assert_eq!(excerpt(&"a".repeat(500), 500), "a".repeat(500));
    }

    #[test]
    fn test_excerpt_truncates_on_characters() {
        let text = "₹".repeat(501);
        let cut = excerpt(&text, 500);
        assert_eq!(cut, format!("{}...", "₹".repeat(500)));
    }

    #[test]
    fn test_document_type_serialization() {
        assert_eq!(
            serde_json::to_string(&DocumentType::LicReceipt).unwrap(),
            "\"LIC_RECEIPT\""
        );
        assert_eq!(
            serde_json::to_string(&DocumentType::OtherDocument).unwrap(),
            "\"OTHER_DOCUMENT\""
        );
    }

    #[test]
    fn test_report_date_round_trip() {
        let date = NaiveDate::from_ymd_opt(2023, 8, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let report = ExtractionReport::new(
            DocumentType::LicReceipt,
            Some(Decimal::from_str("12345.50").unwrap()),
            Some(date),
            "text",
            500,
            Vec::new(),
        );

        assert_eq!(report.submission_date(), Some("2023-08-15T00:00:00"));
        assert_eq!(report.submission_datetime(), Some(date));

        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("warnings"));
        let back: ExtractionReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
