//! Linha de comando: converte o CSV anotado dos Bottins em JSONL com tags IOB

use std::path::PathBuf;

use anyhow::Context;
use bottins_core::{convert_file, ConvertOptions};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bottins")]
#[command(about = "Convert Bottins inline-annotated CSV to JSONL with IOB tags.")]
#[command(version)]
struct Cli {
    /// Path to bottins.csv (original inline-tagged data).
    #[arg(long, env = "BOTTINS_INPUT")]
    input: PathBuf,

    /// Output JSONL path (tokens, tags, text, entities).
    #[arg(long, env = "BOTTINS_OUTPUT")]
    output: PathBuf,

    /// Optional number of rows to process (for quick tests).
    #[arg(long, env = "BOTTINS_LIMIT")]
    limit: Option<usize>,

    /// Print a short progress summary.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG tem prioridade; sem ele, o nível depende de --verbose
    let default_filter = if cli.verbose {
        "bottins_core=info,bottins=info"
    } else {
        "bottins_core=warn,bottins=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let options = ConvertOptions { limit: cli.limit };
    info!("Lendo {}", cli.input.display());

    let summary = convert_file(&cli.input, &cli.output, &options).with_context(|| {
        format!(
            "failed to convert {} -> {}",
            cli.input.display(),
            cli.output.display()
        )
    })?;

    if cli.verbose {
        println!("{}", summary);
    }
    Ok(())
}
