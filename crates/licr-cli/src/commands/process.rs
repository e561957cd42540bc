//! Process command - check a single receipt.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use licr_core::{ProcessingOutcome, ReceiptProcessor};

use super::{load_config, resolve_financial_year};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Receipt document
    #[arg(required = true)]
    input: PathBuf,

    /// Financial year to validate against (e.g. 2023-24)
    #[arg(short = 'y', long, conflicts_with = "metadata")]
    financial_year: Option<String>,

    /// Metadata JSON file supplying the financial year
    #[arg(short, long)]
    metadata: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Fail unless the receipt is an LIC receipt dated inside the financial year
    #[arg(long)]
    strict: bool,
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

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let processor = ReceiptProcessor::from_config(&config)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let financial_year = resolve_financial_year(args.financial_year, args.metadata.as_ref())?;

    info!("Processing file: {}", args.input.display());
    let outcome = processor.process(&args.input, financial_year.as_deref())?;

    let output = format_outcome(&outcome, args.format)?;

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

    for warning in outcome.report.warnings() {
        eprintln!("{} {}", style("!").yellow(), warning);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    if args.strict && !outcome.is_accepted() {
        anyhow::bail!("Receipt {} was not accepted", args.input.display());
    }

    Ok(())
}

pub fn format_outcome(outcome: &ProcessingOutcome, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
        OutputFormat::Csv => format_csv(outcome),
        OutputFormat::Text => Ok(format_text(outcome)),
    }
}

fn format_csv(outcome: &ProcessingOutcome) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "document",
        "document_type",
        "premium_amount",
        "submission_date",
        "financial_year",
        "valid",
        "message",
    ])?;

    wtr.write_record([
        outcome.source.display().to_string(),
        outcome.report.document_type().to_string(),
        outcome
            .report
            .premium_amount()
            .map(|a| a.to_string())
            .unwrap_or_default(),
        outcome.report.submission_date().unwrap_or_default().to_string(),
        outcome.financial_year.clone().unwrap_or_default(),
        outcome
            .validation
            .as_ref()
            .map(|v| v.is_valid.to_string())
            .unwrap_or_default(),
        status_message(outcome),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(outcome: &ProcessingOutcome) -> String {
    let report = &outcome.report;
    let mut output = String::new();

    output.push_str(&format!("Document: {}\n", outcome.source.display()));
    output.push_str(&format!("Document Type: {}\n", report.document_type()));
    output.push_str(&format!(
        "Premium Amount: {}\n",
        report
            .premium_amount()
            .map(|a| a.to_string())
            .unwrap_or_else(|| "not found".to_string())
    ));
    output.push_str(&format!(
        "Submission Date: {}\n",
        report.submission_date().unwrap_or("not found")
    ));
    if let Some(fy) = &outcome.financial_year {
        output.push_str(&format!("Financial Year: {}\n", fy));
    }
    output.push_str(&format!("Result: {}\n", status_message(outcome)));

    output
}

/// One-line status: the validation message, or why validation was skipped.
pub fn status_message(outcome: &ProcessingOutcome) -> String {
    match (&outcome.validation, outcome.skipped) {
        (Some(v), _) => v.message.clone(),
        (None, Some(reason)) => format!("Skipped: {}", reason),
        (None, None) => String::new(),
    }
}
