//! Rule-based field extractors for LIC receipts.
//!
//! Each extractor walks a fixed, ordered list of rules. The first rule that
//! yields a parseable candidate wins, so results never depend on the order in
//! which a regex engine or a collection happens to iterate.

pub mod amounts;
pub mod dates;
pub mod patterns;

pub use amounts::{extract_amount, parse_amount_token, AmountExtractor};
pub use dates::{extract_date, parse_numeric_date, parse_textual_date, DateExtractor, LenientDate};
pub use patterns::LIC_MARKERS;

use regex::Regex;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the highest-priority value from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract every parseable candidate, in priority order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// Kind of extraction rule, listed from most to least reliable per field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// `premium: rs. 1,234` style labelled amount.
    LabelledAmount,
    /// Amount introduced only by a currency symbol.
    SymbolAmount,
    /// `date: 15/08/2023` style labelled date.
    LabelledDate,
    /// Any day/month/year token.
    BareNumericDate,
    /// `15 aug 2023` style date with a month name.
    TextualDate,
}

impl RuleKind {
    /// Confidence reported for matches of this kind.
    pub fn confidence(&self) -> f32 {
        match self {
            RuleKind::LabelledAmount | RuleKind::LabelledDate => 0.95,
            RuleKind::TextualDate => 0.85,
            RuleKind::SymbolAmount => 0.8,
            RuleKind::BareNumericDate => 0.6,
        }
    }
}

/// One entry of an ordered rule list: a template plus the parser for its
/// captured token.
#[derive(Clone, Copy)]
pub struct Rule<P> {
    pub kind: RuleKind,
    /// Label or symbol the template keys on.
    pub name: &'static str,
    pub regex: &'static Regex,
    pub parse: P,
}

/// Extraction context with confidence scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Rule that produced the value.
    pub rule: RuleKind,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// Byte span in the lower-cased source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, rule: RuleKind, source: impl Into<String>) -> Self {
        Self {
            value,
            rule,
            confidence: rule.confidence(),
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
