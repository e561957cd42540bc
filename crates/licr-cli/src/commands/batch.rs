//! Batch processing command for multiple receipts.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use licr_core::{ProcessingOutcome, ReceiptProcessor};

use super::process::{format_outcome, status_message, OutputFormat};
use super::{load_config, resolve_financial_year};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Financial year to validate every receipt against (e.g. 2023-24)
    #[arg(short = 'y', long, conflicts_with = "metadata")]
    financial_year: Option<String>,

    /// Metadata JSON file supplying the financial year
    #[arg(short, long)]
    metadata: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    index: usize,
    path: PathBuf,
    outcome: Option<ProcessingOutcome>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let processor = Arc::new(ReceiptProcessor::from_config(&config)?);
    let financial_year = resolve_financial_year(args.financial_year.clone(), args.metadata.as_ref())?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut tasks = JoinSet::new();

    for (index, path) in files.into_iter().enumerate() {
        let processor = Arc::clone(&processor);
        let semaphore = Arc::clone(&semaphore);
        let financial_year = financial_year.clone();

        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            let file_start = Instant::now();
            let input = path.clone();
            let result = tokio::task::spawn_blocking(move || {
                processor.process(&input, financial_year.as_deref())
            })
            .await?;
            let processing_time_ms = file_start.elapsed().as_millis() as u64;
            anyhow::Ok((index, path, result, processing_time_ms))
        });
    }

    let mut results = Vec::new();

    while let Some(joined) = tasks.join_next().await {
        let (index, path, result, processing_time_ms) = joined??;

        match result {
            Ok(outcome) => results.push(ProcessResult {
                index,
                path,
                outcome: Some(outcome),
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        index,
                        path,
                        outcome: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    tasks.abort_all();
                    progress.abandon();
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        progress.inc(1);
    }

    progress.finish_with_message("Complete");
    results.sort_by_key(|r| r.index);

    if let Some(output_dir) = &args.output_dir {
        for result in &results {
            if let Some(outcome) = &result.outcome {
                let output_name = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("receipt");
                let output_path =
                    output_dir.join(format!("{}.{}", output_name, args.format.extension()));

                fs::write(&output_path, format_outcome(outcome, args.format)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let outcomes: Vec<_> = results.iter().filter_map(|r| r.outcome.as_ref()).collect();
    let accepted = outcomes.iter().filter(|o| o.is_accepted()).count();
    let not_receipts = outcomes.iter().filter(|o| !o.document_valid).count();
    let rejected = outcomes.len() - accepted - not_receipts;
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} accepted, {} not accepted, {} not LIC receipts, {} failed",
        style(accepted).green(),
        style(rejected).yellow(),
        style(not_receipts).dim(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "document_type",
        "premium_amount",
        "submission_date",
        "financial_year",
        "valid",
        "message",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result.path.file_name().and_then(|s| s.to_str()).unwrap_or("");

        if let Some(outcome) = &result.outcome {
            let report = &outcome.report;
            wtr.write_record([
                filename,
                if outcome.is_accepted() { "accepted" } else { "not_accepted" },
                report.document_type().as_str(),
                &report.premium_amount().map(|a| a.to_string()).unwrap_or_default(),
                report.submission_date().unwrap_or_default(),
                outcome.financial_year.as_deref().unwrap_or_default(),
                &outcome
                    .validation
                    .as_ref()
                    .map(|v| v.is_valid.to_string())
                    .unwrap_or_default(),
                &status_message(outcome),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
