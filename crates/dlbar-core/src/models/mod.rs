//! Data models for barcode records and configuration.

pub mod barcode;
pub mod config;
