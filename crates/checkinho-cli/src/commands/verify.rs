//! Verify command - validate the documents of a single folder.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use checkinho_core::{
    render_text, CheckField, CheckScope, CheckStatus, CheckinhoConfig, DocumentSet,
    PdfTextProvider, RunOutcome, ValidationRun,
};

use super::config::load_config;
use crate::discovery::scan_folder;

/// Arguments for the verify command.
#[derive(Args)]
pub struct VerifyArgs {
    /// Folder holding the OS, AP, AT and SICAF PDF files
    #[arg(required = true)]
    dir: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Only count checks of this field (repeatable, e.g. --only cnpj --only pieces)
    #[arg(long = "only", value_name = "FIELD")]
    only: Vec<CheckField>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text report
    Text,
    /// JSON output
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
        }
    }
}

pub async fn run(args: VerifyArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.dir.is_dir() {
        anyhow::bail!("Input folder not found: {}", args.dir.display());
    }

    let files = scan_folder(&args.dir)?;
    if files.ap.is_none() {
        anyhow::bail!("No AP file found in {}", args.dir.display());
    }
    info!("Verifying folder: {}", args.dir.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message("Reading PDF files...");

    let provider = PdfTextProvider::new(config.pdf.clone());
    let documents = files.load(&provider);

    pb.set_message("Validating...");
    let outcome = validate(&files.name, documents, &provider, &config, &args.only)?;
    pb.finish_and_clear();

    let output = format_outcome(&outcome, args.format)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Report written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    print_status(&outcome);
    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Validate one set of documents, restricting the scope to `only` when given.
pub fn validate(
    name: &str,
    documents: DocumentSet,
    provider: &PdfTextProvider,
    config: &CheckinhoConfig,
    only: &[CheckField],
) -> checkinho_core::Result<RunOutcome> {
    let mut run = ValidationRun::new(name, documents, provider, config);
    if !only.is_empty() {
        run = run.with_scope(CheckScope::from_fields(only.iter().copied()));
    }
    run.execute()
}

pub fn format_outcome(outcome: &RunOutcome, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Text => render_text(outcome),
        OutputFormat::Json => serde_json::to_string_pretty(outcome)?,
    })
}

fn print_status(outcome: &RunOutcome) {
    let status = if outcome.is_ok() {
        style(outcome.verdict.status.to_string()).green()
    } else {
        style(outcome.verdict.status.to_string()).red()
    };

    eprintln!(
        "{} {}: {} ({} non-conformities, {} errors)",
        style("ℹ").blue(),
        outcome.name,
        status,
        outcome.count(CheckStatus::NonConformity),
        outcome.count(CheckStatus::Error)
    );

    if !outcome.missing_at_numbers.is_empty() {
        eprintln!(
            "{} AT files listed in the AP but not supplied: {}",
            style("⚠").yellow(),
            outcome.missing_at_numbers.join(", ")
        );
    }
}
