//! Date normalization for AAMVA barcode fields.
//!
//! Issuing jurisdictions encode dates either as `YYYYMMDD` or `MMDDYYYY`.
//! Every parsed date is re-rendered as canonical `YYYYMMDD`.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{BarcodeError, CalendarError};

/// Canonical chrono format for dates stored in a barcode record.
pub const CANONICAL_FORMAT: &str = "%Y%m%d";

/// Leading two digits at or above this value are read as a century.
///
/// Below it they are read as a month. This is an approximation: it holds
/// for birth and expiration dates from 1900 onwards but is not derived
/// from any jurisdiction's documentation.
pub const CENTURY_THRESHOLD: u32 = 19;

const DATE_LEN: usize = 8;

/// Digit layout of an encoded date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLayout {
    /// `YYYYMMDD`
    YearMonthDay,
    /// `MMDDYYYY`
    MonthDayYear,
}

impl DateLayout {
    /// Pick the layout from the first two digits of an all-digit token.
    pub fn detect(token: &str) -> Self {
        let yy: u32 = token.get(..2).and_then(|s| s.parse().ok()).unwrap_or(0);
        if yy >= CENTURY_THRESHOLD {
            Self::YearMonthDay
        } else {
            Self::MonthDayYear
        }
    }

    pub fn format(&self) -> &'static str {
        match self {
            Self::YearMonthDay => CANONICAL_FORMAT,
            Self::MonthDayYear => "%m%d%Y",
        }
    }
}

/// A calendar date with its canonical string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDate {
    pub date: NaiveDate,
    /// `YYYYMMDD`
    pub canonical: String,
}

impl NormalizedDate {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            canonical: date.format(CANONICAL_FORMAT).to_string(),
        }
    }
}

/// Parse a raw date token from the barcode and normalize it.
pub fn normalize_date(token: &str, field: &str) -> Result<NormalizedDate, BarcodeError> {
    let token = token.trim();

    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BarcodeError::InvalidDate {
            field: field.to_string(),
            value: token.to_string(),
        });
    }

    let layout = DateLayout::detect(token);
    debug!("Reading {} date {:?} as {:?}", field, token, layout);

    parse_layout(token, field, layout).map(NormalizedDate::new)
}

/// Parse a canonical `YYYYMMDD` string.
pub fn parse_canonical(value: &str, field: &str) -> Result<NaiveDate, BarcodeError> {
    parse_layout(value, field, DateLayout::YearMonthDay)
}

fn parse_layout(token: &str, field: &str, layout: DateLayout) -> Result<NaiveDate, BarcodeError> {
    let parse_error = |source: CalendarError| BarcodeError::ParseDate {
        field: field.to_string(),
        value: token.to_string(),
        source,
    };

    // chrono accepts single-digit months and days, the barcode never does
    if token.len() != DATE_LEN {
        return Err(parse_error(CalendarError::Length(token.len())));
    }

    NaiveDate::parse_from_str(token, layout.format()).map_err(|e| parse_error(e.into()))
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use pretty_assertions::assert_eq;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_year_first() {
        let result = normalize_date("19690305", "dob").unwrap();
        assert_eq!(result.date, ymd(1969, 3, 5));
        assert_eq!(result.canonical, "19690305");
    }

    #[test]
    fn test_month_first() {
        let result = normalize_date("11051994", "dob").unwrap();
        assert_eq!(result.date, ymd(1994, 11, 5));
        assert_eq!(result.canonical, "19941105");

        let result = normalize_date("01122026", "exp").unwrap();
        assert_eq!(result.canonical, "20260112");
    }

    #[test]
    fn test_layouts_converge() {
        let us = normalize_date("07122023", "exp").unwrap();
        let iso = normalize_date("20230712", "exp").unwrap();
        assert_eq!(us, iso);
    }

    #[test]
    fn test_canonical_is_idempotent() {
        let first = normalize_date("20260112", "exp").unwrap();
        let second = normalize_date(&first.canonical, "exp").unwrap();
        assert_eq!(first.canonical, second.canonical);
    }

    #[test]
    fn test_detect_threshold() {
        assert_eq!(DateLayout::detect("19000101"), DateLayout::YearMonthDay);
        assert_eq!(DateLayout::detect("18121999"), DateLayout::MonthDayYear);
        assert_eq!(DateLayout::detect("12312030"), DateLayout::MonthDayYear);
    }

    #[test]
    fn test_invalid_date() {
        let err = normalize_date("someteststring", "testField").unwrap_err();
        assert_eq!(
            err.to_string(),
            "fieldname: \"testField\" : invalid date: \"someteststring\""
        );
        assert!(err.is_date_error());

        assert!(matches!(
            normalize_date("", "dob"),
            Err(BarcodeError::InvalidDate { .. })
        ));
        assert!(matches!(
            normalize_date("-1969030", "dob"),
            Err(BarcodeError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_impossible_calendar_value() {
        let err = normalize_date("99999999", "testField").unwrap_err();
        assert_eq!(
            err.to_string(),
            "fieldname: \"testField\" : could not parse date \"99999999\""
        );
        assert!(matches!(err, BarcodeError::ParseDate { .. }));
        assert!(err.source().is_some());

        assert!(matches!(
            normalize_date("20231332", "exp"),
            Err(BarcodeError::ParseDate { .. })
        ));
    }

    #[test]
    fn test_wrong_length() {
        let err = normalize_date("2023071", "exp").unwrap_err();
        match err {
            BarcodeError::ParseDate { source, .. } => {
                assert_eq!(source, CalendarError::Length(7));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_canonical() {
        assert_eq!(parse_canonical("20230712", "exp").unwrap(), ymd(2023, 7, 12));
        assert_eq!(parse_canonical("00010101", "exp").unwrap(), ymd(1, 1, 1));
        assert!(parse_canonical("07122023", "exp").is_err());
    }

    #[test]
    fn test_zero_date_renders_padded() {
        assert_eq!(NormalizedDate::new(ymd(1, 1, 1)).canonical, "00010101");
    }
}
