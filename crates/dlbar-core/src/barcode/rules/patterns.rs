//! Regex patterns for AAMVA data element extraction.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::barcode::FieldLabel;

lazy_static! {
    // Customer ID number
    pub static ref SERIAL_FIELD: Regex = element_pattern(FieldLabel::DocumentSerial.id());

    // Date of birth
    pub static ref DOB_FIELD: Regex = element_pattern(FieldLabel::DateOfBirth.id());

    // Document expiration date
    pub static ref EXPIRY_FIELD: Regex = element_pattern(FieldLabel::Expiry.id());
}

/// Pattern for a data element directly after a newline.
///
/// The first element of a subfile may sit on the header line right after
/// the `DL`/`ID` subfile designator, e.g. `ANSI 6360350800...DLDAQ1234`.
/// A label at offset 0 never matches. Capture group 1 is the element value.
fn element_pattern(id: &str) -> Regex {
    Regex::new(&format!(
        r"\n(?:(?:ANSI ?|AAMVA)[^\n]*?(?:DL|ID))?{id}\s*(\S+)"
    ))
    .unwrap()
}

/// Compiled pattern for a field label.
pub fn field_pattern(label: FieldLabel) -> &'static Regex {
    match label {
        FieldLabel::DocumentSerial => &*SERIAL_FIELD,
        FieldLabel::DateOfBirth => &*DOB_FIELD,
        FieldLabel::Expiry => &*EXPIRY_FIELD,
    }
}
