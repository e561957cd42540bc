//! LIC receipt classification, field extraction and period validation.

mod classifier;
pub mod period;
mod processor;
mod report;
pub mod rules;

pub use classifier::DocumentClassifier;
pub use period::{is_well_formed_label, validate, validate_period, FinancialYear, PeriodError};
pub use processor::{ProcessingOutcome, ReceiptProcessor, SkipReason};
pub use report::{classify_and_extract, ReceiptExtractor};
pub use rules::{extract_amount, extract_date, FieldExtractor};
