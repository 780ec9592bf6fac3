//! Error types for the dlbar-core library.

use thiserror::Error;

/// Main error type for the dlbar library.
#[derive(Error, Debug)]
pub enum DlbarError {
    /// Barcode data quality error.
    #[error(transparent)]
    Barcode(#[from] BarcodeError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl DlbarError {
    /// Whether this error is a member of the barcode error taxonomy.
    pub fn is_barcode_error(&self) -> bool {
        matches!(self, Self::Barcode(_))
    }

    /// Whether this error is a date-related barcode error.
    pub fn is_date_error(&self) -> bool {
        match self {
            Self::Barcode(e) => e.is_date_error(),
            Self::Io(_) | Self::Config(_) => false,
        }
    }
}

/// Errors produced while parsing barcode data or reconciling its dates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BarcodeError {
    /// The payload is not structurally a barcode record (no line breaks).
    #[error("invalid barcode data")]
    InvalidData,

    /// The date token contains something other than decimal digits.
    #[error("fieldname: {field:?} : invalid date: {value:?}")]
    InvalidDate { field: String, value: String },

    /// The date token is numeric but does not form a calendar date.
    #[error("fieldname: {field:?} : could not parse date {value:?}")]
    ParseDate {
        field: String,
        value: String,
        #[source]
        source: CalendarError,
    },

    /// The label was not found at the start of a line.
    #[error("prefix: {prefix:?} could not be extracted from the barcode data")]
    PrefixExtraction { prefix: String, is_date: bool },

    /// The barcode date differs from the date supplied by the caller.
    #[error(
        "fieldname: {field:?} : barcode date {barcode:?} does not match passed date {reference:?} - using barcode date"
    )]
    BarcodeDateMismatch {
        field: String,
        reference: String,
        barcode: String,
    },
}

/// Tag of a [`BarcodeError`], for matching without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidData,
    InvalidDate,
    ParseDate,
    PrefixExtraction,
    BarcodeDateMismatch,
}

impl BarcodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidData => ErrorKind::InvalidData,
            Self::InvalidDate { .. } => ErrorKind::InvalidDate,
            Self::ParseDate { .. } => ErrorKind::ParseDate,
            Self::PrefixExtraction { .. } => ErrorKind::PrefixExtraction,
            Self::BarcodeDateMismatch { .. } => ErrorKind::BarcodeDateMismatch,
        }
    }

    /// Whether the error concerns a date field.
    ///
    /// A missing serial number is text-quality noise; everything touching
    /// the date of birth or expiration date is reported as date-related.
    pub fn is_date_error(&self) -> bool {
        match self {
            Self::InvalidDate { .. } | Self::ParseDate { .. } | Self::BarcodeDateMismatch { .. } => {
                true
            }
            Self::PrefixExtraction { is_date, .. } => *is_date,
            Self::InvalidData => false,
        }
    }
}

/// Underlying calendar failure wrapped by [`BarcodeError::ParseDate`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// Date tokens are always eight digits long.
    #[error("expected 8 digits, found {0}")]
    Length(usize),

    /// The digits do not describe a valid Gregorian date.
    #[error(transparent)]
    Chrono(#[from] chrono::ParseError),
}

/// Result type for the dlbar library.
pub type Result<T> = std::result::Result<T, DlbarError>;

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_mismatch_message() {
        let err = BarcodeError::BarcodeDateMismatch {
            field: "exp".to_string(),
            reference: "20111231".to_string(),
            barcode: "20230712".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "fieldname: \"exp\" : barcode date \"20230712\" does not match passed date \"20111231\" - using barcode date"
        );
    }

    #[test]
    fn test_prefix_message() {
        let err = BarcodeError::PrefixExtraction {
            prefix: "DAQ".to_string(),
            is_date: false,
        };
        assert_eq!(
            err.to_string(),
            "prefix: \"DAQ\" could not be extracted from the barcode data"
        );
        assert!(!err.is_date_error());
    }

    #[test]
    fn test_date_classification() {
        assert!(!BarcodeError::InvalidData.is_date_error());
        assert!(
            BarcodeError::InvalidDate {
                field: "dob".to_string(),
                value: "abc".to_string(),
            }
            .is_date_error()
        );
        assert!(
            BarcodeError::PrefixExtraction {
                prefix: "DBB".to_string(),
                is_date: true,
            }
            .is_date_error()
        );
        assert!(
            BarcodeError::ParseDate {
                field: "dob".to_string(),
                value: "1234".to_string(),
                source: CalendarError::Length(4),
            }
            .is_date_error()
        );
    }

    #[test]
    fn test_parse_date_exposes_source() {
        let err = BarcodeError::ParseDate {
            field: "dob".to_string(),
            value: "1234".to_string(),
            source: CalendarError::Length(4),
        };
        let source = err.source().expect("source");
        assert_eq!(source.to_string(), "expected 8 digits, found 4");
    }

    #[test]
    fn test_crate_error_classification() {
        let err: DlbarError = BarcodeError::InvalidData.into();
        assert!(err.is_barcode_error());
        assert!(!err.is_date_error());

        let err = DlbarError::Config("bad".to_string());
        assert!(!err.is_barcode_error());
        assert_eq!(err.to_string(), "configuration error: bad");
    }
}
