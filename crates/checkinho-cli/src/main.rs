//! `checkinho`: reconcile the OS, AP, AT and SICAF documents of a process.

mod commands;
mod discovery;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, extract, verify};

/// Cross-check a service order against its production authorization,
/// production tickets and supplier registration record
#[derive(Parser)]
#[command(name = "checkinho")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log detail on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// JSON configuration file; the user config directory is used when omitted
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the documents of one process folder
    Verify(verify::VerifyArgs),

    /// Check every process folder found under a root folder
    Batch(batch::BatchArgs),

    /// Print the fields (or the text) read from one PDF
    Extract(extract::ExtractArgs),

    /// Show, create or query the configuration file
    Config(config::ConfigArgs),
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Reports go to stdout; logs stay on stderr.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(cli.verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Verify(args) => verify::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Extract(args) => extract::run(args, config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
