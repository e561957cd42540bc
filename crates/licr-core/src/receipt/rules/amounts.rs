//! Premium amount extraction.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::trace;

use super::patterns::{LABELLED_AMOUNT, PAID_AMOUNT, PREMIUM_AMOUNT, RS_AMOUNT, RUPEE_SIGN_AMOUNT};
use super::{ExtractionMatch, FieldExtractor, Rule, RuleKind};

/// Parser for a captured amount token.
pub type AmountParser = fn(&str) -> Option<Decimal>;

/// Amount rule.
pub type AmountRule = Rule<AmountParser>;

/// Amount rules in priority order: labels before bare currency symbols.
pub fn amount_rules() -> [AmountRule; 5] {
    [
        Rule {
            kind: RuleKind::LabelledAmount,
            name: "premium",
            regex: &PREMIUM_AMOUNT,
            parse: parse_amount_token,
        },
        Rule {
            kind: RuleKind::LabelledAmount,
            name: "amount",
            regex: &LABELLED_AMOUNT,
            parse: parse_amount_token,
        },
        Rule {
            kind: RuleKind::LabelledAmount,
            name: "paid",
            regex: &PAID_AMOUNT,
            parse: parse_amount_token,
        },
        Rule {
            kind: RuleKind::SymbolAmount,
            name: "₹",
            regex: &RUPEE_SIGN_AMOUNT,
            parse: parse_amount_token,
        },
        Rule {
            kind: RuleKind::SymbolAmount,
            name: "rs",
            regex: &RS_AMOUNT,
            parse: parse_amount_token,
        },
    ]
}

/// Amount field extractor.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Candidates in priority order: at most one per rule, taken from that
    /// rule's first occurrence. A rule whose first occurrence does not parse
    /// yields nothing and the next rule is tried.
    fn candidates<'t>(
        &self,
        lowered: &'t str,
    ) -> impl Iterator<Item = ExtractionMatch<Decimal>> + 't {
        amount_rules().into_iter().filter_map(move |rule| {
            let caps = rule.regex.captures(lowered)?;
            let token = caps.get(1)?;
            match (rule.parse)(token.as_str()) {
                Some(amount) => Some(
                    ExtractionMatch::new(amount, rule.kind, token.as_str())
                        .with_position(token.start(), token.end()),
                ),
                None => {
                    trace!("Skipping unparseable {} amount {:?}", rule.name, token.as_str());
                    None
                }
            }
        })
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let lowered = text.to_lowercase();
        self.candidates(&lowered).next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let lowered = text.to_lowercase();
        self.candidates(&lowered).collect()
    }
}

/// Extract the premium amount from receipt text.
pub fn extract_amount(text: &str) -> Option<Decimal> {
    AmountExtractor::new().extract(text).map(|m| m.value)
}

/// Parse an amount token such as `12,345.50`, dropping thousands separators.
pub fn parse_amount_token(token: &str) -> Option<Decimal> {
    let cleaned = token.replace(',', "");
    let cleaned = cleaned.trim_end_matches('.');
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(cleaned).ok()
}
