//! Document classification by marker phrase density.

use tracing::debug;

use super::rules::LIC_MARKERS;
use crate::models::receipt::DocumentType;

/// Classifies a document as an LIC receipt when enough distinct marker
/// phrases occur in its text.
///
/// A single incidental phrase (a bare "receipt no") must not be enough, so
/// the default threshold is three distinct markers.
#[derive(Debug, Clone)]
pub struct DocumentClassifier {
    markers: &'static [&'static str],
    min_matches: usize,
}

impl DocumentClassifier {
    pub fn new() -> Self {
        Self {
            markers: &LIC_MARKERS,
            min_matches: 3,
        }
    }

    /// Set the number of distinct markers required.
    pub fn with_min_matches(mut self, min_matches: usize) -> Self {
        self.min_matches = min_matches;
        self
    }

    /// Distinct markers present in `text`, case-insensitively.
    pub fn matched_markers(&self, text: &str) -> Vec<&'static str> {
        let lowered = text.to_lowercase();
        self.markers
            .iter()
            .copied()
            .filter(|marker| lowered.contains(marker))
            .collect()
    }

    pub fn classify(&self, text: &str) -> DocumentType {
        let matched = self.matched_markers(text);
        debug!("Matched {} LIC markers: {:?}", matched.len(), matched);

        if matched.len() >= self.min_matches {
            DocumentType::LicReceipt
        } else {
            DocumentType::OtherDocument
        }
    }
}

impl Default for DocumentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_markers_classify_as_receipt() {
        let text = "LIFE INSURANCE CORPORATION of India\nPolicy Number: 123456789\nPremium Paid: 5,000";
        assert_eq!(DocumentClassifier::new().classify(text), DocumentType::LicReceipt);
    }

    #[test]
    fn test_single_marker_is_other() {
        assert_eq!(
            DocumentClassifier::new().classify("Receipt No 42 for groceries"),
            DocumentType::OtherDocument
        );
    }

    #[test]
    fn test_two_markers_is_other() {
        let text = "Premium Receipt\nPolicy Number 998877";
        assert_eq!(DocumentClassifier::new().classify(text), DocumentType::OtherDocument);
    }

    #[test]
    fn test_repeated_marker_counts_once() {
        let text = "receipt no 1, receipt no 2, receipt no 3, RECEIPT NO 4";
        let classifier = DocumentClassifier::new();
        assert_eq!(classifier.matched_markers(text), vec!["receipt no"]);
        assert_eq!(classifier.classify(text), DocumentType::OtherDocument);
    }

    #[test]
    fn test_markers_in_any_order() {
        let text = "premium paid ... receipt no ... lic of india";
        assert_eq!(DocumentClassifier::new().classify(text), DocumentType::LicReceipt);
    }

    #[test]
    fn test_custom_threshold() {
        let text = "Premium Receipt\nPolicy Number 998877";
        let classifier = DocumentClassifier::new().with_min_matches(2);
        assert_eq!(classifier.classify(text), DocumentType::LicReceipt);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(DocumentClassifier::new().classify(""), DocumentType::OtherDocument);
    }
}
