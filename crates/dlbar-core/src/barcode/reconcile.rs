//! Reconciliation of barcode dates against dates of record.
//!
//! When the barcode and the caller disagree, the barcode wins. The mismatch
//! is reported alongside the barcode's date so callers can audit it.

use chrono::NaiveDate;
use tracing::warn;

use super::rules::dates::{parse_canonical, NormalizedDate};
use crate::error::BarcodeError;
use crate::models::barcode::{BarcodeRecord, FieldLabel};

/// Outcome of [`BarcodeRecord::select_date`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Date the caller should use.
    pub date: Option<NaiveDate>,
    /// Mismatch advisory or re-parse failure.
    pub error: Option<BarcodeError>,
}

impl Reconciliation {
    fn keep(date: Option<NaiveDate>) -> Self {
        Self { date, error: None }
    }

    /// Whether the barcode date replaced the caller's date.
    pub fn is_mismatch(&self) -> bool {
        matches!(self.error, Some(BarcodeError::BarcodeDateMismatch { .. }))
    }

    /// Drop the resolved date when an error was reported.
    pub fn into_result(self) -> Result<Option<NaiveDate>, BarcodeError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.date),
        }
    }
}

/// Canonical form of the zero date, compared when the caller has none.
const ZERO_DATE: &str = "00010101";

impl BarcodeRecord {
    /// Compare the barcode's date for `label` with `reference`.
    ///
    /// Returns `reference` untouched when the barcode has no usable date or
    /// both agree. Otherwise returns the barcode date together with a
    /// [`BarcodeError::BarcodeDateMismatch`].
    ///
    /// # Panics
    ///
    /// Panics if `label` is not a date field.
    pub fn select_date(&self, label: FieldLabel, reference: Option<NaiveDate>) -> Reconciliation {
        assert!(label.is_date(), "invalid date field: {}", label);

        let Some(barcode) = self.field(label).as_str() else {
            return Reconciliation::keep(reference);
        };

        let sent = reference.map_or_else(
            || ZERO_DATE.to_string(),
            |date| NormalizedDate::new(date).canonical,
        );
        if sent == barcode {
            return Reconciliation::keep(reference);
        }

        match parse_canonical(barcode, label.field_name()) {
            Ok(date) => {
                let mismatch = BarcodeError::BarcodeDateMismatch {
                    field: label.field_name().to_string(),
                    reference: sent,
                    barcode: barcode.to_string(),
                };
                warn!("{}", mismatch);
                Reconciliation {
                    date: Some(date),
                    error: Some(mismatch),
                }
            }
            Err(e) => Reconciliation {
                date: reference,
                error: Some(e),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const BARCODE: &str = "@\nDAQFFGG5566\nDBA20230712\nDBB19690305\n";

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_agreement_keeps_reference() {
        let record = BarcodeRecord::parse(BARCODE).unwrap();
        let outcome = record.select_date(FieldLabel::DateOfBirth, Some(ymd(1969, 3, 5)));
        assert_eq!(outcome, Reconciliation::keep(Some(ymd(1969, 3, 5))));
    }

    #[test]
    fn test_barcode_wins_on_mismatch() {
        let record = BarcodeRecord::parse(BARCODE).unwrap();
        let outcome = record.select_date(FieldLabel::Expiry, Some(ymd(2011, 12, 31)));

        assert!(outcome.is_mismatch());
        assert_eq!(outcome.date, Some(ymd(2023, 7, 12)));
        assert_eq!(
            outcome.error.unwrap().to_string(),
            "fieldname: \"exp\" : barcode date \"20230712\" does not match passed date \"20111231\" - using barcode date"
        );
    }

    #[test]
    fn test_missing_reference_compares_as_zero_date() {
        let record = BarcodeRecord::parse(BARCODE).unwrap();
        let outcome = record.select_date(FieldLabel::Expiry, None);

        assert_eq!(outcome.date, Some(ymd(2023, 7, 12)));
        assert_eq!(
            outcome.error,
            Some(BarcodeError::BarcodeDateMismatch {
                field: "exp".to_string(),
                reference: "00010101".to_string(),
                barcode: "20230712".to_string(),
            })
        );
    }

    #[test]
    fn test_missing_barcode_date_passes_reference_through() {
        let record = BarcodeRecord::parse("invalid\nbarcode\ndata").unwrap();

        let outcome = record.select_date(FieldLabel::DateOfBirth, Some(ymd(1969, 3, 5)));
        assert_eq!(outcome, Reconciliation::keep(Some(ymd(1969, 3, 5))));

        let outcome = record.select_date(FieldLabel::Expiry, None);
        assert_eq!(outcome.into_result(), Ok(None));
    }

    #[test]
    fn test_into_result() {
        let record = BarcodeRecord::parse(BARCODE).unwrap();
        let err = record
            .select_date(FieldLabel::DateOfBirth, Some(ymd(2011, 12, 31)))
            .into_result()
            .unwrap_err();
        assert!(err.is_date_error());
    }

    #[test]
    #[should_panic(expected = "invalid date field: serial")]
    fn test_serial_is_not_a_date_field() {
        let record = BarcodeRecord::parse(BARCODE).unwrap();
        record.select_date(FieldLabel::DocumentSerial, None);
    }
}
