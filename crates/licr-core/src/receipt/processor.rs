//! Receipt processing pipeline: read, extract, check the document type and
//! validate the submission date against a financial year.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use super::period::validate_period;
use super::report::ReceiptExtractor;
use crate::error::Result;
use crate::models::config::LicrConfig;
use crate::models::receipt::{ExtractionReport, ValidationResult};
use crate::source::{resolve_text_source, TextSource};

/// Why financial year validation did not run for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The document was not classified as an LIC receipt.
    NotLicReceipt,
    /// No financial year was supplied.
    NoFinancialYear,
    /// No submission date could be extracted.
    NoSubmissionDate,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SkipReason::NotLicReceipt => "document is not an LIC receipt",
            SkipReason::NoFinancialYear => "no financial year supplied",
            SkipReason::NoSubmissionDate => "could not extract submission date from receipt",
        })
    }
}

/// Everything known about one processed document.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingOutcome {
    pub source: PathBuf,
    pub report: ExtractionReport,
    /// Whether the document is an LIC receipt.
    pub document_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<SkipReason>,
}

impl ProcessingOutcome {
    /// A receipt whose date was validated inside its financial year.
    pub fn is_accepted(&self) -> bool {
        self.document_valid && self.validation.as_ref().is_some_and(|v| v.is_valid)
    }
}

/// Runs documents from a [`TextSource`] through extraction and validation.
pub struct ReceiptProcessor {
    source: Box<dyn TextSource>,
    extractor: ReceiptExtractor,
}

impl ReceiptProcessor {
    pub fn new(source: Box<dyn TextSource>, extractor: ReceiptExtractor) -> Self {
        Self { source, extractor }
    }

    /// Resolve the configured text source and build the extractor.
    ///
    /// Fails with a configuration error when the source is unavailable.
    pub fn from_config(config: &LicrConfig) -> Result<Self> {
        let source = resolve_text_source(&config.source)?;
        Ok(Self::new(source, ReceiptExtractor::from_config(config)))
    }

    pub fn extractor(&self) -> &ReceiptExtractor {
        &self.extractor
    }

    /// Process one document. Only an unavailable document is an error;
    /// missing fields and failed validation are part of the outcome.
    pub fn process(&self, path: &Path, financial_year: Option<&str>) -> Result<ProcessingOutcome> {
        info!("Processing {} with {} source", path.display(), self.source.name());

        let text = self.source.read_text(path)?;
        let report = self.extractor.extract(&text);
        let document_valid = report.is_lic_receipt();

        let (validation, skipped) = if !document_valid {
            (None, Some(SkipReason::NotLicReceipt))
        } else if let Some(fy) = financial_year {
            match report.submission_date() {
                Some(date) => (Some(validate_period(Some(date), fy)), None),
                None => (None, Some(SkipReason::NoSubmissionDate)),
            }
        } else {
            (None, Some(SkipReason::NoFinancialYear))
        };

        match (&validation, skipped) {
            (Some(v), _) => info!("{}", v.message),
            (None, Some(reason)) => info!("Skipping financial year validation: {}", reason),
            (None, None) => {}
        }

        Ok(ProcessingOutcome {
            source: path.to_path_buf(),
            report,
            document_valid,
            financial_year: financial_year.map(str::to_string),
            validation,
            skipped,
        })
    }
}
