//! Reconcile command - compare a barcode date with a date of record.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use tracing::info;

use dlbar_core::{BarcodeError, BarcodeRecord, FieldLabel};

use super::{load_config, read_payload};

/// Arguments for the reconcile command.
#[derive(Args)]
pub struct ReconcileArgs {
    /// Barcode payload file ("-" for stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// Date field to compare
    #[arg(long, value_enum)]
    field: DateFieldArg,

    /// Date of record (YYYY-MM-DD or YYYYMMDD)
    #[arg(long, value_parser = parse_reference_date)]
    date: Option<NaiveDate>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum DateFieldArg {
    /// Date of birth
    Dob,
    /// Expiration date
    Exp,
}

impl From<DateFieldArg> for FieldLabel {
    fn from(value: DateFieldArg) -> Self {
        match value {
            DateFieldArg::Dob => FieldLabel::DateOfBirth,
            DateFieldArg::Exp => FieldLabel::Expiry,
        }
    }
}

fn parse_reference_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y%m%d"))
        .map_err(|_| format!("expected YYYY-MM-DD or YYYYMMDD, got {:?}", s))
}

pub fn run(args: ReconcileArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let payload = read_payload(&args.input)?;
    let record = BarcodeRecord::parse(&payload)?;

    let label = FieldLabel::from(args.field);
    info!("Reconciling {} against {:?}", label, args.date);

    let outcome = record.select_date(label, args.date);

    match &outcome.date {
        Some(date) => println!("{}", date.format("%Y%m%d")),
        None => println!("-"),
    }

    match outcome.error {
        None => Ok(()),
        Some(mismatch @ BarcodeError::BarcodeDateMismatch { .. }) => {
            eprintln!("{} {}", style("⚠").yellow(), mismatch);
            if config.reconcile.fail_on_mismatch {
                Err(mismatch.into())
            } else {
                Ok(())
            }
        }
        Some(other) => Err(other.into()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_reference_date() {
        let expected = NaiveDate::from_ymd_opt(2011, 12, 31).unwrap();
        assert_eq!(parse_reference_date("2011-12-31"), Ok(expected));
        assert_eq!(parse_reference_date("20111231"), Ok(expected));
        assert!(parse_reference_date("12/31/2011").is_err());
    }

    #[test]
    fn test_field_mapping() {
        assert_eq!(FieldLabel::from(DateFieldArg::Dob), FieldLabel::DateOfBirth);
        assert_eq!(FieldLabel::from(DateFieldArg::Exp), FieldLabel::Expiry);
    }
}
