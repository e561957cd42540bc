//! Core library for LIC premium receipt processing.
//!
//! This crate provides:
//! - Document classification from marker phrase density
//! - Premium amount and submission date extraction (ordered regex rules)
//! - Financial year (April - March) validation of the submission date
//! - Pluggable text sources and a receipt processing pipeline

pub mod error;
pub mod models;
pub mod receipt;
pub mod source;

pub use error::{LicrError, Result, SourceError};
pub use models::config::LicrConfig;
pub use models::metadata::ReceiptMetadata;
pub use models::receipt::{DocumentType, ExtractionReport, ValidationResult};
pub use receipt::{
    classify_and_extract, validate_period, DocumentClassifier, FinancialYear, ProcessingOutcome,
    ReceiptExtractor, ReceiptProcessor,
};
pub use source::{resolve_text_source, CommandTextSource, PlainTextSource, TextSource};
