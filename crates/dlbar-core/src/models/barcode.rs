//! Barcode data models for AAMVA driver's license payloads.

use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::error::BarcodeError;

/// AAMVA data element identifiers this library reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldLabel {
    /// Customer ID number (`DAQ`).
    DocumentSerial,
    /// Date of birth (`DBB`).
    DateOfBirth,
    /// Document expiration date (`DBA`).
    Expiry,
}

impl FieldLabel {
    pub const ALL: [FieldLabel; 3] = [Self::DocumentSerial, Self::DateOfBirth, Self::Expiry];

    /// Three-character element identifier as it appears in the payload.
    pub fn id(&self) -> &'static str {
        match self {
            Self::DocumentSerial => "DAQ",
            Self::DateOfBirth => "DBB",
            Self::Expiry => "DBA",
        }
    }

    /// Short field name used in error messages.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::DocumentSerial => "serial",
            Self::DateOfBirth => "dob",
            Self::Expiry => "exp",
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(self, Self::DateOfBirth | Self::Expiry)
    }
}

impl fmt::Display for FieldLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Outcome of parsing a single field.
///
/// Either `value` is set (and `date`, for date fields) or `error` explains
/// why it is not.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FieldResult {
    /// Extracted value; canonical `YYYYMMDD` for date fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Resolved calendar date (date fields only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    /// Why the field could not be read.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_error"
    )]
    pub error: Option<BarcodeError>,
}

impl FieldResult {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn dated(date: NaiveDate, canonical: impl Into<String>) -> Self {
        Self {
            value: Some(canonical.into()),
            date: Some(date),
            error: None,
        }
    }

    pub fn failed(error: BarcodeError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Value as a string slice, if the field was read.
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

fn serialize_error<S: Serializer>(
    error: &Option<BarcodeError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match error {
        Some(e) => serializer.serialize_str(&e.to_string()),
        None => serializer.serialize_none(),
    }
}

/// Parsed driver's license barcode.
///
/// Built once by [`BarcodeRecord::parse`] and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarcodeRecord {
    raw: String,
    document_serial: FieldResult,
    date_of_birth: FieldResult,
    expiry: FieldResult,
}

impl BarcodeRecord {
    pub(crate) fn new(
        raw: String,
        document_serial: FieldResult,
        date_of_birth: FieldResult,
        expiry: FieldResult,
    ) -> Self {
        Self {
            raw,
            document_serial,
            date_of_birth,
            expiry,
        }
    }

    /// Trimmed payload the record was built from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn document_serial(&self) -> &FieldResult {
        &self.document_serial
    }

    pub fn date_of_birth(&self) -> &FieldResult {
        &self.date_of_birth
    }

    pub fn expiry(&self) -> &FieldResult {
        &self.expiry
    }

    pub fn field(&self, label: FieldLabel) -> &FieldResult {
        match label {
            FieldLabel::DocumentSerial => &self.document_serial,
            FieldLabel::DateOfBirth => &self.date_of_birth,
            FieldLabel::Expiry => &self.expiry,
        }
    }

    /// Per-field errors, in label order.
    pub fn errors(&self) -> impl Iterator<Item = (FieldLabel, &BarcodeError)> {
        FieldLabel::ALL
            .into_iter()
            .filter_map(|label| self.field(label).error.as_ref().map(|e| (label, e)))
    }

    /// Whether every field was read without error.
    pub fn is_complete(&self) -> bool {
        self.errors().next().is_none()
    }
}
