use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use trichroma_rs::capture::{
    CaptureSequencer, FileFrameSource, FileImageStore, MemoryCatalogue, SequencerConfig,
};
use trichroma_rs::image_pipeline::{OutputConfig, TiffCompression};
use trichroma_rs::logger;

use tracing::{error, info};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Jpeg,
    Tiff,
}

/// Recombine three colour-filtered exposures into one full-colour image.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Exposure taken through the red filter (JPEG)
    red: PathBuf,
    /// Exposure taken through the green filter (JPEG)
    green: PathBuf,
    /// Exposure taken through the blue filter (JPEG)
    blue: PathBuf,

    /// Seconds to wait between exposures
    #[arg(long, default_value_t = 0.0)]
    delay: f32,

    /// Directory the composite is written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Jpeg)]
    format: Format,

    /// JPEG quality (1-100)
    #[arg(long, default_value_t = 90)]
    quality: u8,

    /// Log per-stage spans and session timings
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(args.verbose);

    info!("Starting trichroma...");

    let output = match args.format {
        Format::Jpeg => OutputConfig::builder().jpeg_quality(args.quality).build(),
        Format::Tiff => OutputConfig::builder().tiff(TiffCompression::DeflateBalanced).build(),
    };
    info!("Output format: {:?}", output.format);

    let delay = Duration::try_from_secs_f32(args.delay)
        .with_context(|| format!("invalid delay: {}", args.delay))?;

    let store = Arc::new(FileImageStore::new(&args.output_dir, output));
    let catalogue = Arc::new(MemoryCatalogue::new());
    let sequencer = CaptureSequencer::new(store, catalogue, SequencerConfig::default());
    let source = FileFrameSource::new([args.red, args.green, args.blue]);

    match sequencer.run_capture(&source, delay).await {
        Ok(record) => {
            info!("Composite saved to {} ({})", record.path.display(), record.taken_at_display());
            Ok(())
        }
        Err(e) => {
            error!("Capture failed: {}", e);
            Err(e).context("capture session failed")
        }
    }
}
