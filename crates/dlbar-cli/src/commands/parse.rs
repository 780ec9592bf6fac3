//! Parse command - extract fields from a single barcode payload.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use dlbar_core::{BarcodeRecord, FieldLabel, OutputFormat};

use super::{load_config, read_payload};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Barcode payload file ("-" for stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Fail if any field could not be read
    #[arg(long)]
    strict: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum FormatArg {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Text => OutputFormat::Text,
        }
    }
}

pub fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    info!("Parsing payload: {}", args.input.display());
    let payload = read_payload(&args.input)?;
    let record = BarcodeRecord::parse(&payload)?;

    let format = args.format.map(OutputFormat::from).unwrap_or(config.output.format);
    let output = format_record(&record, format, config.output.pretty)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    let failed = record.errors().count();
    if failed > 0 {
        eprintln!("{}", style("Field issues:").yellow());
        for (_, error) in record.errors() {
            eprintln!("  - {}", error);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    if args.strict && failed > 0 {
        anyhow::bail!("{} of {} fields could not be read", failed, FieldLabel::ALL.len());
    }

    Ok(())
}

/// Render a record in the requested format.
pub fn format_record(
    record: &BarcodeRecord,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    let output = match format {
        OutputFormat::Json if pretty => serde_json::to_string_pretty(record)?,
        OutputFormat::Json => serde_json::to_string(record)?,
        OutputFormat::Csv => format_record_csv(record)?,
        OutputFormat::Text => format_record_text(record),
    };
    Ok(output)
}

fn format_record_csv(record: &BarcodeRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "document_serial",
        "date_of_birth",
        "expiry",
        "document_serial_error",
        "date_of_birth_error",
        "expiry_error",
    ])?;

    let values = FieldLabel::ALL.map(|label| {
        record
            .field(label)
            .as_str()
            .unwrap_or_default()
            .to_string()
    });
    let errors = FieldLabel::ALL.map(|label| {
        record
            .field(label)
            .error
            .as_ref()
            .map(|e| e.to_string())
            .unwrap_or_default()
    });
    wtr.write_record(values.iter().chain(errors.iter()))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_record_text(record: &BarcodeRecord) -> String {
    let mut output = String::new();

    for label in FieldLabel::ALL {
        let field = record.field(label);
        let name = match label {
            FieldLabel::DocumentSerial => "Document serial",
            FieldLabel::DateOfBirth => "Date of birth",
            FieldLabel::Expiry => "Expiration date",
        };

        match (&field.value, field.date, &field.error) {
            (_, Some(date), _) => output.push_str(&format!("{}: {}\n", name, date)),
            (Some(value), None, _) => output.push_str(&format!("{}: {}\n", name, value)),
            (None, None, Some(error)) => output.push_str(&format!("{}: - ({})\n", name, error)),
            (None, None, None) => output.push_str(&format!("{}: -\n", name)),
        }
    }

    output
}
