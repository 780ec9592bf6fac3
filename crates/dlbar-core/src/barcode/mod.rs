//! AAMVA barcode field extraction and date reconciliation.

mod parser;
mod reconcile;
pub mod rules;

pub use parser::{AamvaBarcodeParser, BarcodeParser};
pub use reconcile::Reconciliation;
