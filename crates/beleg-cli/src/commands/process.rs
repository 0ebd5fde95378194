//! Process command - extract fields from a single invoice document.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::debug;

use beleg_core::{InvoiceParser, ParsedInvoice};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF, or a .txt file holding an extracted text layer)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Exit with an error when the result needs manual review
    #[arg(long)]
    fail_on_review: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    debug!("processing file: {}", args.input.display());

    let parser = InvoiceParser::default();
    let parsed = super::parse_file(&parser, &args.input)?;

    if parsed.needs_review {
        print_review_warning(&parsed);
    }

    let output = format_parsed(&parsed, args.format)?;

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

    if args.fail_on_review && parsed.needs_review {
        anyhow::bail!("extraction needs manual review");
    }

    Ok(())
}

fn print_review_warning(parsed: &ParsedInvoice) {
    eprintln!("{}", style("Needs manual review:").yellow());

    let missing: Vec<&str> = [
        ("client name", parsed.client_name.is_none()),
        ("invoice date", parsed.invoice_date.is_none()),
        ("total amount", parsed.total_amount.is_none()),
    ]
    .iter()
    .filter(|(_, is_missing)| *is_missing)
    .map(|(field, _)| *field)
    .collect();

    if missing.is_empty() {
        eprintln!("  - one or more fields were extracted with low confidence");
    } else {
        for field in missing {
            eprintln!("  - {} not found", field);
        }
    }
}

pub(crate) fn format_parsed(parsed: &ParsedInvoice, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(parsed)?),
        OutputFormat::Csv => format_csv(parsed),
        OutputFormat::Text => Ok(format_text(parsed)),
    }
}

fn format_csv(parsed: &ParsedInvoice) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "client_name",
        "invoice_date",
        "total_amount",
        "invoice_number",
        "needs_review",
    ])?;

    wtr.write_record([
        parsed.client_name.clone().unwrap_or_default(),
        parsed
            .invoice_date
            .map(|d| d.to_string())
            .unwrap_or_default(),
        parsed.total_amount.clone().unwrap_or_default(),
        parsed.invoice_number.clone().unwrap_or_default(),
        parsed.needs_review.to_string(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(parsed: &ParsedInvoice) -> String {
    let mut output = String::new();

    let value_or_dash = |value: Option<&str>| value.unwrap_or("-").to_string();

    output.push_str(&format!(
        "Client:  {}\n",
        value_or_dash(parsed.client_name.as_deref())
    ));
    output.push_str(&format!(
        "Date:    {}\n",
        parsed
            .invoice_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string())
    ));
    output.push_str(&format!(
        "Total:   {}\n",
        value_or_dash(parsed.total_amount.as_deref())
    ));
    output.push_str(&format!(
        "Number:  {}\n",
        value_or_dash(parsed.invoice_number.as_deref())
    ));
    output.push_str(&format!("Review:  {}\n", parsed.needs_review));

    output
}
