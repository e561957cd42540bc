//! Extraction report assembly.

use tracing::{debug, warn};

use super::classifier::DocumentClassifier;
use super::rules::{AmountExtractor, DateExtractor, FieldExtractor};
use crate::models::config::LicrConfig;
use crate::models::receipt::ExtractionReport;

/// Classifies a document and extracts its premium amount and submission
/// date into an [`ExtractionReport`].
pub struct ReceiptExtractor {
    classifier: DocumentClassifier,
    amounts: AmountExtractor,
    dates: DateExtractor,
    excerpt_chars: usize,
}

impl ReceiptExtractor {
    /// Create an extractor with default settings.
    pub fn new() -> Self {
        Self {
            classifier: DocumentClassifier::new(),
            amounts: AmountExtractor::new(),
            dates: DateExtractor::new(),
            excerpt_chars: 500,
        }
    }

    pub fn from_config(config: &LicrConfig) -> Self {
        Self::new()
            .with_classifier(
                DocumentClassifier::new()
                    .with_min_matches(config.classification.min_marker_matches),
            )
            .with_dates(DateExtractor::new().with_order(config.extraction.date_order))
            .with_excerpt_chars(config.extraction.excerpt_chars)
    }

    pub fn with_classifier(mut self, classifier: DocumentClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_dates(mut self, dates: DateExtractor) -> Self {
        self.dates = dates;
        self
    }

    /// Set the length of the raw text excerpt kept in reports.
    pub fn with_excerpt_chars(mut self, excerpt_chars: usize) -> Self {
        self.excerpt_chars = excerpt_chars;
        self
    }

    pub fn classifier(&self) -> &DocumentClassifier {
        &self.classifier
    }

    pub fn extract(&self, text: &str) -> ExtractionReport {
        let document_type = self.classifier.classify(text);
        let amount = self.amounts.extract(text);
        let date = self.dates.extract(text);

        let mut warnings = Vec::new();
        if let Some(m) = &date {
            if let Some(alternative) = m.value.alternative {
                let message = format!(
                    "Ambiguous date {:?} read as {}; could also be {}",
                    m.source,
                    m.value.value.date(),
                    alternative
                );
                warn!("{}", message);
                warnings.push(message);
            }
        }

        debug!(
            "Extracted {} amount={:?} ({:?}) date={:?} ({:?})",
            document_type,
            amount.as_ref().map(|m| m.value),
            amount.as_ref().map(|m| m.rule),
            date.as_ref().map(|m| m.value.value),
            date.as_ref().map(|m| m.rule),
        );

        ExtractionReport::new(
            document_type,
            amount.map(|m| m.value),
            date.map(|m| m.value.value),
            text,
            self.excerpt_chars,
            warnings,
        )
    }
}

impl Default for ReceiptExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify `raw_text` and extract its fields with default settings.
pub fn classify_and_extract(raw_text: &str) -> ExtractionReport {
    ReceiptExtractor::new().extract(raw_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::DateOrder;
    use crate::models::receipt::DocumentType;
    use crate::receipt::period::validate_period;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const RECEIPT: &str = r#"
        LIFE INSURANCE CORPORATION OF INDIA
        PREMIUM RECEIPT
        Receipt No: 7781/23
        Policy Number: 512345678
        Name: A. Kumar
        Premium Paid: Rs. 12,345.50
        Date: 15/08/2023
        Next due 15/08/2024
    "#;

    #[test]
    fn test_full_receipt() {
        let report = classify_and_extract(RECEIPT);

        assert_eq!(report.document_type(), DocumentType::LicReceipt);
        assert_eq!(
            report.premium_amount(),
            Some(Decimal::from_str("12345.50").unwrap())
        );
        assert_eq!(report.submission_date(), Some("2023-08-15T00:00:00"));
        assert!(report.warnings().is_empty());
        assert_eq!(report.excerpt(), RECEIPT);
    }

    #[test]
    fn test_missing_fields_are_independent() {
        let report = classify_and_extract("Premium: 1,000 with no date at all");
        assert_eq!(report.document_type(), DocumentType::OtherDocument);
        assert!(report.premium_amount().is_some());
        assert_eq!(report.submission_date(), None);

        let report = classify_and_extract("dated: 02/03/2023 but no money");
        assert_eq!(report.premium_amount(), None);
        assert!(report.submission_date().is_some());
    }

    #[test]
    fn test_long_text_excerpt() {
        let text = format!("{}{}", "x".repeat(500), "tail");
        let report = classify_and_extract(&text);
        assert_eq!(report.excerpt(), format!("{}...", "x".repeat(500)));
    }

    #[test]
    fn test_ambiguous_date_warning() {
        let report = classify_and_extract("Date: 05/06/2023");
        assert_eq!(report.submission_date(), Some("2023-06-05T00:00:00"));
        assert_eq!(report.warnings().len(), 1);
        assert!(report.warnings()[0].contains("2023-05-06"));
    }

    #[test]
    fn test_from_config() {
        let mut config = LicrConfig::default();
        config.extraction.date_order = DateOrder::MonthFirst;
        config.extraction.excerpt_chars = 4;
        config.classification.min_marker_matches = 1;

        let report = ReceiptExtractor::from_config(&config).extract("Receipt No 1, Date: 05/06/2023");
        assert_eq!(report.document_type(), DocumentType::LicReceipt);
        assert_eq!(report.submission_date(), Some("2023-05-06T00:00:00"));
        assert_eq!(report.excerpt(), "Rece...");
    }

    #[test]
    fn test_report_date_feeds_validation() {
        let report = classify_and_extract(RECEIPT);
        let result = validate_period(report.submission_date(), "2023-24");
        assert!(result.is_valid);
        assert_eq!(
            result.message,
            "Premium submission date 2023-08-15 is valid for FY 2023-24"
        );
    }
}
