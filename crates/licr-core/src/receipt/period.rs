//! Financial year (April 1 - March 31) validation.

use std::num::ParseIntError;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::receipt::ValidationResult;

/// Why a financial year label could not be interpreted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PeriodError {
    #[error("expected a label like 2023-24, got {0:?}")]
    Shape(String),

    #[error("invalid {part} year {value:?}: {source}")]
    Component {
        part: &'static str,
        value: String,
        source: ParseIntError,
    },

    #[error("start year {0} is out of range")]
    OutOfRange(i32),

    #[error("invalid submission date {0:?}")]
    Date(String),
}

/// A parsed `YYYY-YY` financial year label.
///
/// The period always ends one year after `start_year`; the two-digit suffix
/// is kept for display only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinancialYear {
    label: String,
    start_year: i32,
    end_suffix: u32,
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl FinancialYear {
    pub fn parse(label: &str) -> Result<Self, PeriodError> {
        let parts: Vec<&str> = label.split('-').collect();
        let [start, suffix] = parts.as_slice() else {
            return Err(PeriodError::Shape(label.to_string()));
        };

        let start_year: i32 = start.trim().parse().map_err(|source| PeriodError::Component {
            part: "start",
            value: start.to_string(),
            source,
        })?;
        let end_suffix: u32 = suffix.trim().parse().map_err(|source| PeriodError::Component {
            part: "end",
            value: suffix.to_string(),
            source,
        })?;

        let start = NaiveDate::from_ymd_opt(start_year, 4, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or(PeriodError::OutOfRange(start_year))?;
        let end = start_year
            .checked_add(1)
            .and_then(|y| NaiveDate::from_ymd_opt(y, 3, 31))
            .and_then(|d| d.and_hms_opt(23, 59, 59))
            .ok_or(PeriodError::OutOfRange(start_year))?;

        Ok(Self {
            label: label.to_string(),
            start_year,
            end_suffix,
            start,
            end,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    /// First instant of the period (`start_year-04-01T00:00:00`).
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Last instant of the period (`start_year+1-03-31T23:59:59`).
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Whether the suffix names the year after `start_year` (`2023-24`).
    pub fn suffix_matches(&self) -> bool {
        (self.start_year + 1).rem_euclid(100) as u32 == self.end_suffix
    }

    /// Inclusive on both ends.
    pub fn contains(&self, date: NaiveDateTime) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Check a submission date against a financial year label.
pub fn validate(date: NaiveDateTime, financial_year: &str) -> ValidationResult {
    match FinancialYear::parse(financial_year) {
        Ok(fy) => check(date, &fy),
        Err(e) => error_result(&e),
    }
}

/// Check an ISO-8601 submission date (as found in an extraction report)
/// against a financial year label.
///
/// Never fails: malformed labels, missing or unparseable dates are reported
/// as an invalid result with a descriptive message.
pub fn validate_period(date: Option<&str>, financial_year: &str) -> ValidationResult {
    let fy = match FinancialYear::parse(financial_year) {
        Ok(fy) => fy,
        Err(e) => return error_result(&e),
    };

    let Some(raw) = date else {
        return ValidationResult::invalid(format!(
            "No premium submission date to validate for FY {}",
            financial_year
        ));
    };

    match parse_iso_datetime(raw) {
        Some(date) => check(date, &fy),
        None => error_result(&PeriodError::Date(raw.to_string())),
    }
}

fn check(date: NaiveDateTime, fy: &FinancialYear) -> ValidationResult {
    if !fy.suffix_matches() {
        warn!(
            "Financial year {} suffix does not follow start year {}; using {} to {}",
            fy.label(),
            fy.start_year(),
            fy.start().date(),
            fy.end().date()
        );
    }

    let day = date.format("%Y-%m-%d");
    let valid = fy.contains(date);
    debug!("Submission date {} in FY {}: {}", date, fy.label(), valid);

    if valid {
        ValidationResult::valid(format!(
            "Premium submission date {} is valid for FY {}",
            day,
            fy.label()
        ))
    } else {
        ValidationResult::invalid(format!(
            "Premium submission date {} not in FY {}",
            day,
            fy.label()
        ))
    }
}

fn error_result(e: &PeriodError) -> ValidationResult {
    ValidationResult::invalid(format!("Error validating financial year: {}", e))
}

/// Parse an ISO-8601 date or date-time as a local (naive) date-time.
///
/// Offsets such as `Z` or `+05:30` are dropped, keeping the wall-clock time.
pub fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    const FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local())
}

/// Upload-time shape check for a label: `YYYY-YY` with ASCII digits.
pub fn is_well_formed_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    bytes.len() == 7
        && bytes[4] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || b.is_ascii_digit())
}
