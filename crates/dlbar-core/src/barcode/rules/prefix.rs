//! Label-prefixed data element extraction.

use tracing::debug;

use super::patterns::field_pattern;
use super::{ExtractionMatch, FieldExtractor};
use crate::error::BarcodeError;
use crate::models::barcode::FieldLabel;

/// Extractor for one AAMVA data element.
pub struct PrefixExtractor {
    label: FieldLabel,
}

impl PrefixExtractor {
    pub fn new(label: FieldLabel) -> Self {
        Self { label }
    }
}

impl FieldExtractor for PrefixExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let value = field_pattern(self.label).captures(text)?.get(1)?;

        Some(ExtractionMatch::new(
            value.as_str().to_string(),
            value.start(),
            value.end(),
        ))
    }
}

/// Locate the first occurrence of a labeled field.
pub fn locate_field(text: &str, label: FieldLabel) -> Option<ExtractionMatch<String>> {
    PrefixExtractor::new(label).extract(text)
}

/// Extract the value of a labeled field.
///
/// The label must directly follow a newline (or the subfile designator on
/// the header line); occurrences inside other values, or on the first line
/// of the text, are ignored.
pub fn extract_field(text: &str, label: FieldLabel) -> Result<String, BarcodeError> {
    match locate_field(text, label) {
        Some(found) => {
            debug!(
                "Found {} at {}..{}",
                label.id(),
                found.position.0,
                found.position.1
            );
            Ok(found.value)
        }
        None => Err(BarcodeError::PrefixExtraction {
            prefix: label.id().to_string(),
            is_date: label.is_date(),
        }),
    }
}
