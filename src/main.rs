use anyhow::Result;
use clap::Parser;
use pagelift::config::ExtractOptions;
use pagelift::events::{ExtractionEvent, FnSink};
use pagelift::logging::init_logging;
use pagelift::pipeline::PdfExtractor;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "pagelift")]
#[command(about = "Extract text from a PDF, OCR-ing pages without a usable text layer")]
struct Cli {
    /// Input PDF file
    input: PathBuf,

    /// Output file (optional, defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Config file with extraction options
    #[arg(short, long, default_value = "pagelift.toml")]
    config: PathBuf,

    /// OCR language code (overrides config)
    #[arg(long)]
    lang: Option<String>,

    /// Raster scale for OCR rendering (overrides config)
    #[arg(long)]
    scale: Option<f32>,

    /// Minimum embedded-text length to skip OCR (overrides config)
    #[arg(long)]
    threshold: Option<usize>,

    /// Suppress progress reporting
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    file: &'a PathBuf,
    total_pages: usize,
    options: &'a ExtractOptions,
    text: &'a str,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(if cli.quiet { "warn" } else { "info" });

    let mut options = ExtractOptions::load_from_file(&cli.config)?;
    if let Some(lang) = cli.lang {
        options.ocr_language = lang;
    }
    if let Some(scale) = cli.scale {
        options.raster_scale = scale;
    }
    if let Some(threshold) = cli.threshold {
        options.text_threshold = threshold;
    }

    let extractor = PdfExtractor::with_defaults(options)?;

    let quiet = cli.quiet;
    let total_pages = std::sync::atomic::AtomicUsize::new(0);
    let progress = FnSink(|event: ExtractionEvent| {
        if let ExtractionEvent::Progress {
            current_page,
            total_pages: total,
        } = event
        {
            total_pages.store(total, std::sync::atomic::Ordering::Relaxed);
            if !quiet {
                info!("Page {}/{}", current_page, total);
            }
        }
    });

    let text = match extractor.extract_file(&cli.input, &progress).await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!("{}", e.user_message());
            return Err(e.into());
        }
    };

    let output = match cli.format.as_str() {
        "json" => {
            let report = JsonReport {
                file: &cli.input,
                total_pages: total_pages.load(std::sync::atomic::Ordering::Relaxed),
                options: extractor.options(),
                text: &text,
            };
            serde_json::to_string_pretty(&report)?
        }
        "text" => text,
        other => anyhow::bail!("unknown format: {} (expected text or json)", other),
    };

    match cli.output {
        Some(path) => {
            tokio::fs::write(&path, &output).await?;
            info!("Wrote {} bytes to {:?}", output.len(), path);
        }
        None => println!("{}", output),
    }

    Ok(())
}
