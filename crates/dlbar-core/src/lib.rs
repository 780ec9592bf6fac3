//! Core library for driver's license barcode parsing.
//!
//! This crate provides:
//! - AAMVA data element extraction (customer ID number, date of birth, expiration date)
//! - Date normalization for `YYYYMMDD` and `MMDDYYYY` encodings
//! - Reconciliation of barcode dates against dates of record
//! - A structured error taxonomy with date-error classification

pub mod barcode;
pub mod error;
pub mod models;

pub use barcode::{AamvaBarcodeParser, BarcodeParser, Reconciliation};
pub use error::{BarcodeError, CalendarError, DlbarError, ErrorKind, Result};
pub use models::barcode::{BarcodeRecord, FieldLabel, FieldResult};
pub use models::config::{DlbarConfig, OutputFormat};
