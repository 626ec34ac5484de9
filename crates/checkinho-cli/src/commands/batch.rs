//! Batch command - validate every run folder under a root folder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use checkinho_core::{CheckField, CheckStatus, PdfTextProvider, RunOutcome};

use super::config::load_config;
use super::verify::{format_outcome, validate, OutputFormat};
use crate::discovery::discover;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Root folder holding one subfolder per run (campaign folders allowed)
    #[arg(required = true)]
    root: PathBuf,

    /// Output directory for the per-run reports
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each report
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Only count checks of this field (repeatable)
    #[arg(long = "only", value_name = "FIELD")]
    only: Vec<CheckField>,
}

/// Result of validating a single run folder.
struct RunResult {
    name: String,
    outcome: Option<RunOutcome>,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.root.is_dir() {
        anyhow::bail!("Input folder not found: {}", args.root.display());
    }

    let discovery = discover(&args.root)?;
    if discovery.runs.is_empty() {
        anyhow::bail!("No folder with an AP file found under {}", args.root.display());
    }

    println!(
        "{} Found {} folders, {} with an AP file",
        style("ℹ").blue(),
        discovery.sent(),
        discovery.runs.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(discovery.runs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let provider = PdfTextProvider::new(config.pdf.clone());
    let mut results = Vec::with_capacity(discovery.runs.len());

    for files in &discovery.runs {
        pb.set_message(files.name.clone());
        let documents = files.load(&provider);

        match validate(&files.name, documents, &provider, &config, &args.only) {
            Ok(outcome) => {
                if let Some(output_dir) = &args.output_dir {
                    write_report(output_dir, &outcome, args.format)?;
                }
                results.push(RunResult {
                    name: files.name.clone(),
                    outcome: Some(outcome),
                    error: None,
                });
            }
            // A failed run is recorded; its siblings still run.
            Err(e) => {
                warn!("Failed to validate {}: {}", files.name, e);
                results.push(RunResult {
                    name: files.name.clone(),
                    outcome: None,
                    error: Some(e.to_string()),
                });
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

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

    print_summary(&results, &discovery.ignored);
    debug!("Batch finished in {:?}", start.elapsed());

    Ok(())
}

fn write_report(output_dir: &Path, outcome: &RunOutcome, format: OutputFormat) -> anyhow::Result<()> {
    let output_path = output_dir.join(format!("{}.{}", outcome.name, format.extension()));
    fs::write(&output_path, format_outcome(outcome, format)?)?;
    debug!("Wrote report to {}", output_path.display());
    Ok(())
}

fn print_summary(results: &[RunResult], ignored: &[String]) {
    let processed: Vec<&RunOutcome> = results.iter().filter_map(|r| r.outcome.as_ref()).collect();
    let (ok, nc): (Vec<&RunOutcome>, Vec<&RunOutcome>) =
        processed.iter().copied().partition(|outcome| outcome.is_ok());
    let failed: Vec<&RunResult> = results.iter().filter(|r| r.error.is_some()).collect();

    println!();
    println!("Folders sent:      {}", results.len() + ignored.len());
    println!("Folders processed: {}", processed.len());
    println!("Folders ignored:   {}", ignored.len());

    for name in ignored {
        println!("  {} {} (no AP file)", style("-").dim(), name);
    }

    if !ok.is_empty() {
        println!("{}", style("Processes OK:").green());
        for outcome in &ok {
            println!("  - {}", outcome.name);
        }
    }

    if !nc.is_empty() {
        println!("{}", style("Processes NC:").red());
        for outcome in &nc {
            println!("  - {}", outcome.name);
        }
    }

    if !failed.is_empty() {
        println!("{}", style("Failed folders:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.name,
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }
}

fn write_summary(path: &Path, results: &[RunResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["name", "status", "checks", "non_conformities", "errors", "error"])?;

    for result in results {
        match &result.outcome {
            Some(outcome) => wtr.write_record([
                result.name.as_str(),
                &outcome.verdict.status.to_string(),
                &outcome.scoped_checks().count().to_string(),
                &outcome.count(CheckStatus::NonConformity).to_string(),
                &outcome.count(CheckStatus::Error).to_string(),
                "",
            ])?,
            None => wtr.write_record([
                result.name.as_str(),
                "error",
                "",
                "",
                "",
                result.error.as_deref().unwrap_or(""),
            ])?,
        }
    }

    wtr.flush()?;
    Ok(())
}
