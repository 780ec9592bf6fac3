//! Rule-based extractors for AAMVA barcode fields.

pub mod dates;
pub mod patterns;
pub mod prefix;

pub use dates::{normalize_date, parse_canonical, DateLayout, NormalizedDate, CENTURY_THRESHOLD};
pub use prefix::{extract_field, locate_field, PrefixExtractor};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}

/// A located field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte span of the value in the source text.
    pub position: (usize, usize),
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, start: usize, end: usize) -> Self {
        Self {
            value,
            position: (start, end),
        }
    }
}
