//! Batch processing command for multiple invoice documents.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use beleg_core::{InvoiceParser, ParsedInvoice};

use super::process::{format_parsed, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

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
struct FileResult {
    path: PathBuf,
    parsed: Option<ParsedInvoice>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs) -> anyhow::Result<()> {
    let start = Instant::now();

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
        })
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

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    // The extractors are pure functions over their input text with no
    // ordering dependency, so files can be fanned out to a bounded
    // worker pool.
    let parser = Arc::new(InvoiceParser::default());
    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut tasks = JoinSet::new();

    for (index, path) in files.into_iter().enumerate() {
        let parser = Arc::clone(&parser);
        let semaphore = Arc::clone(&semaphore);

        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
            let file_start = Instant::now();

            let worker_path = path.clone();
            let outcome =
                tokio::task::spawn_blocking(move || super::parse_file(&parser, &worker_path))
                    .await
                    .map_err(|e| anyhow::anyhow!("worker panicked: {}", e))
                    .and_then(|result| result);

            let processing_time_ms = file_start.elapsed().as_millis() as u64;
            let result = match outcome {
                Ok(parsed) => FileResult {
                    path,
                    parsed: Some(parsed),
                    error: None,
                    processing_time_ms,
                },
                Err(e) => FileResult {
                    path,
                    parsed: None,
                    error: Some(e.to_string()),
                    processing_time_ms,
                },
            };

            (index, result)
        });
    }

    let mut indexed: Vec<(usize, FileResult)> = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let (index, result) = joined?;
        if let Some(error) = &result.error {
            warn!("failed to process {}: {}", result.path.display(), error);
        }
        pb.inc(1);
        indexed.push((index, result));
    }
    pb.finish_with_message("Complete");

    // Restore input order for outputs and the summary
    indexed.sort_by_key(|(index, _)| *index);
    let results: Vec<FileResult> = indexed.into_iter().map(|(_, result)| result).collect();

    let failed: Vec<&FileResult> = results.iter().filter(|r| r.error.is_some()).collect();
    if !failed.is_empty() && !args.continue_on_error {
        anyhow::bail!(
            "Processing failed for {}: {}",
            failed[0].path.display(),
            failed[0].error.as_deref().unwrap_or("unknown error")
        );
    }

    // Write outputs
    for result in &results {
        if let (Some(parsed), Some(output_dir)) = (&result.parsed, &args.output_dir) {
            let stem = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("invoice");

            let extension = match args.format {
                OutputFormat::Json => "json",
                OutputFormat::Csv => "csv",
                OutputFormat::Text => "txt",
            };

            let output_path = output_dir.join(format!("{}.{}", stem, extension));
            fs::write(&output_path, format_parsed(parsed, args.format)?)?;
            debug!("wrote output to {}", output_path.display());
        }
    }

    // Generate summary if requested
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

    // Print summary
    let successful = results.iter().filter(|r| r.parsed.is_some()).count();
    let flagged = results
        .iter()
        .filter(|r| r.parsed.as_ref().is_some_and(|p| p.needs_review))
        .count();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful ({} flagged for review), {} failed",
        style(successful).green(),
        style(flagged).yellow(),
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

fn write_summary(path: &PathBuf, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "client_name",
        "invoice_date",
        "total_amount",
        "invoice_number",
        "needs_review",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();

        if let Some(parsed) = &result.parsed {
            wtr.write_record([
                filename,
                "success".to_string(),
                parsed.client_name.clone().unwrap_or_default(),
                parsed
                    .invoice_date
                    .map(|d| d.to_string())
                    .unwrap_or_default(),
                parsed.total_amount.clone().unwrap_or_default(),
                parsed.invoice_number.clone().unwrap_or_default(),
                parsed.needs_review.to_string(),
                result.processing_time_ms.to_string(),
                String::new(),
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error".to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                result.processing_time_ms.to_string(),
                result.error.clone().unwrap_or_default(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
