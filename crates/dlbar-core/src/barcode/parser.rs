//! Barcode record builder.

use tracing::{debug, warn};

use super::rules::{extract_field, normalize_date};
use crate::error::BarcodeError;
use crate::models::barcode::{BarcodeRecord, FieldLabel, FieldResult};

/// Trait for barcode payload parsing.
pub trait BarcodeParser {
    /// Parse a decoded barcode payload into a record.
    fn parse(&self, text: &str) -> Result<BarcodeRecord, BarcodeError>;
}

/// Parser for AAMVA DL/ID payloads.
///
/// Reads the customer ID number, date of birth and expiration date. A
/// field that cannot be read is recorded on its [`FieldResult`]; only a
/// payload without any line break fails as a whole.
#[derive(Debug, Clone, Copy, Default)]
pub struct AamvaBarcodeParser;

impl AamvaBarcodeParser {
    pub fn new() -> Self {
        Self
    }

    fn read_text(&self, text: &str, label: FieldLabel) -> FieldResult {
        match extract_field(text, label) {
            Ok(value) => FieldResult::text(value),
            Err(e) => {
                warn!("{}", e);
                FieldResult::failed(e)
            }
        }
    }

    fn read_date(&self, text: &str, label: FieldLabel) -> FieldResult {
        let result = extract_field(text, label)
            .and_then(|token| normalize_date(&token, label.field_name()));

        match result {
            Ok(normalized) => FieldResult::dated(normalized.date, normalized.canonical),
            Err(e) => {
                warn!("{}", e);
                FieldResult::failed(e)
            }
        }
    }
}

impl BarcodeParser for AamvaBarcodeParser {
    fn parse(&self, text: &str) -> Result<BarcodeRecord, BarcodeError> {
        if !text.contains('\n') {
            return Err(BarcodeError::InvalidData);
        }

        let text = text.trim();

        let document_serial = self.read_text(text, FieldLabel::DocumentSerial);
        let date_of_birth = self.read_date(text, FieldLabel::DateOfBirth);
        let expiry = self.read_date(text, FieldLabel::Expiry);

        let record = BarcodeRecord::new(text.to_string(), document_serial, date_of_birth, expiry);
        debug!(
            "Parsed barcode with {} field errors",
            record.errors().count()
        );

        Ok(record)
    }
}

impl BarcodeRecord {
    /// Parse a decoded barcode payload with the default AAMVA parser.
    pub fn parse(text: &str) -> Result<Self, BarcodeError> {
        AamvaBarcodeParser::new().parse(text)
    }
}
