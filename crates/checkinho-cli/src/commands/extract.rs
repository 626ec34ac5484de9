//! Extract command - show the fields read from a single PDF.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tracing::info;

use checkinho_core::extraction::classify_sicaf;
use checkinho_core::models::config::ExtractionConfig;
use checkinho_core::{
    extract_fields, extract_fields_as, DocumentFields, DocumentSubtype, DocumentType,
    PdfTextProvider, RawDocument, TextStrategy,
};

use super::config::load_config;
use crate::discovery::document_type_of;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Document type (OS, AP, AT or SICAF); guessed from the file name when omitted
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    document_type: Option<DocumentType>,

    /// Text extraction strategy (plain, stream or layout)
    #[arg(short, long, default_value = "plain")]
    strategy: TextStrategy,

    /// Print the extracted text instead of the fields
    #[arg(long)]
    raw: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let document_type = match args.document_type {
        Some(document_type) => document_type,
        None => args
            .input
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(document_type_of)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Cannot tell the document type of {}; pass --type",
                    args.input.display()
                )
            })?,
    };

    info!("Extracting {} fields from {}", document_type, args.input.display());

    let provider = PdfTextProvider::new(config.pdf.clone());
    let text = provider.read_text(&args.input, args.strategy)?;

    let output = if args.raw {
        text
    } else {
        let document = RawDocument::new(document_type, text, args.input.display().to_string());
        let fields = extract(&document, &provider, &config.extraction)?;
        serde_json::to_string_pretty(&fields)?
    };

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

    Ok(())
}

/// Fields of one document; declaration SICAFs are read from their layout text.
fn extract(
    document: &RawDocument,
    provider: &PdfTextProvider,
    config: &ExtractionConfig,
) -> anyhow::Result<DocumentFields> {
    match document.document_type {
        DocumentType::Sicaf if classify_sicaf(&document.text) == DocumentSubtype::Sicaf2 => {
            let text = provider.read_text(Path::new(&document.source), TextStrategy::Layout)?;
            let layout = RawDocument::new(DocumentType::Sicaf, text, document.source.clone());
            Ok(extract_fields_as(&layout, DocumentSubtype::Sicaf2))
        }
        _ => Ok(extract_fields(document, config)),
    }
}
