//! Submission date extraction.
//!
//! Candidates are parsed leniently: numeric dates are read day-first or
//! month-first according to [`DateOrder`], falling back to the other reading
//! when the preferred one is not a real date (`12/13/2023`). When both
//! readings are valid and differ the result is flagged as ambiguous instead
//! of being silently guessed.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::trace;

use super::patterns::{
    DATED_LABELLED, DATE_LABELLED, NUMERIC_DATE, NUMERIC_DATE_PARTS, RECEIPT_DATE_LABELLED,
    TEXTUAL_DATE, TEXTUAL_DATE_PARTS,
};
use super::{ExtractionMatch, FieldExtractor, Rule, RuleKind};
use crate::models::config::DateOrder;

/// Parser for a captured date token.
pub type DateParser = fn(&str, DateOrder) -> Option<LenientDate>;

/// Date rule.
pub type DateRule = Rule<DateParser>;

/// Date rules in priority order: labelled dates, then bare numeric dates,
/// then dates with a month name.
pub fn date_rules() -> [DateRule; 5] {
    [
        Rule {
            kind: RuleKind::LabelledDate,
            name: "date",
            regex: &DATE_LABELLED,
            parse: parse_numeric_date,
        },
        Rule {
            kind: RuleKind::LabelledDate,
            name: "dated",
            regex: &DATED_LABELLED,
            parse: parse_numeric_date,
        },
        Rule {
            kind: RuleKind::LabelledDate,
            name: "receipt date",
            regex: &RECEIPT_DATE_LABELLED,
            parse: parse_numeric_date,
        },
        Rule {
            kind: RuleKind::BareNumericDate,
            name: "numeric",
            regex: &NUMERIC_DATE,
            parse: parse_numeric_date,
        },
        Rule {
            kind: RuleKind::TextualDate,
            name: "textual",
            regex: &TEXTUAL_DATE,
            parse: parse_textual_date,
        },
    ]
}

/// A leniently parsed date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LenientDate {
    /// Parsed value, at midnight.
    pub value: NaiveDateTime,
    /// The other valid reading of an ambiguous numeric date.
    pub alternative: Option<NaiveDate>,
}

impl LenientDate {
    fn at_midnight(date: NaiveDate) -> Self {
        Self {
            value: date.and_time(chrono::NaiveTime::MIN),
            alternative: None,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        self.alternative.is_some()
    }
}

/// Date field extractor.
pub struct DateExtractor {
    order: DateOrder,
}

impl DateExtractor {
    pub fn new() -> Self {
        Self {
            order: DateOrder::default(),
        }
    }

    /// Set the preferred reading of ambiguous numeric dates.
    pub fn with_order(mut self, order: DateOrder) -> Self {
        self.order = order;
        self
    }

    /// Every candidate of every rule, in rule order then text order, keeping
    /// only those that parse.
    fn candidates<'t>(
        &self,
        lowered: &'t str,
    ) -> impl Iterator<Item = ExtractionMatch<LenientDate>> + 't {
        let order = self.order;
        date_rules().into_iter().flat_map(move |rule| {
            rule.regex.captures_iter(lowered).filter_map(move |caps| {
                let token = caps.get(1)?;
                match (rule.parse)(token.as_str(), order) {
                    Some(date) => Some(
                        ExtractionMatch::new(date, rule.kind, token.as_str())
                            .with_position(token.start(), token.end()),
                    ),
                    None => {
                        trace!("Skipping unparseable {} date {:?}", rule.name, token.as_str());
                        None
                    }
                }
            })
        })
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<LenientDate>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let lowered = text.to_lowercase();
        self.candidates(&lowered).next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let lowered = text.to_lowercase();
        self.candidates(&lowered).collect()
    }
}

/// Extract the submission date from receipt text, reading numeric dates
/// day-first.
pub fn extract_date(text: &str) -> Option<NaiveDateTime> {
    DateExtractor::new().extract(text).map(|m| m.value.value)
}

/// Parse `D/M/Y`, `D-M-Y` (or month-first, per `order`) tokens.
pub fn parse_numeric_date(token: &str, order: DateOrder) -> Option<LenientDate> {
    let caps = NUMERIC_DATE_PARTS.captures(token.trim())?;
    let first: u32 = caps[1].parse().ok()?;
    let second: u32 = caps[2].parse().ok()?;
    let year = parse_year(&caps[3])?;

    let (preferred, fallback) = match order {
        DateOrder::DayFirst => ((first, second), (second, first)),
        DateOrder::MonthFirst => ((second, first), (first, second)),
    };

    // (day, month) pairs
    let preferred = NaiveDate::from_ymd_opt(year, preferred.1, preferred.0);
    let fallback = NaiveDate::from_ymd_opt(year, fallback.1, fallback.0);

    match (preferred, fallback) {
        (Some(chosen), Some(other)) if chosen != other => Some(LenientDate {
            alternative: Some(other),
            ..LenientDate::at_midnight(chosen)
        }),
        (Some(chosen), _) => Some(LenientDate::at_midnight(chosen)),
        (None, Some(other)) => Some(LenientDate::at_midnight(other)),
        (None, None) => None,
    }
}

/// Parse `15 aug 2023` / `15 august 23` tokens.
pub fn parse_textual_date(token: &str, _order: DateOrder) -> Option<LenientDate> {
    let caps = TEXTUAL_DATE_PARTS.captures(token.trim())?;
    let day: u32 = caps[1].parse().ok()?;
    let month = month_from_name(&caps[2])?;
    let year = parse_year(&caps[3])?;

    NaiveDate::from_ymd_opt(year, month, day).map(LenientDate::at_midnight)
}

fn parse_year(s: &str) -> Option<i32> {
    let year: i32 = s.parse().ok()?;
    match s.len() {
        // Two-digit year: assume 2000s for 00-50, 1900s for 51-99
        2 if year <= 50 => Some(2000 + year),
        2 => Some(1900 + year),
        4 if year > 0 => Some(year),
        _ => None,
    }
}

fn month_from_name(name: &str) -> Option<u32> {
    let month = match name {
        "jan" | "january" => 1,
        "feb" | "february" => 2,
        "mar" | "march" => 3,
        "apr" | "april" => 4,
        "may" => 5,
        "jun" | "june" => 6,
        "jul" | "july" => 7,
        "aug" | "august" => 8,
        "sep" | "sept" | "september" => 9,
        "oct" | "october" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => return None,
    };
    Some(month)
}
