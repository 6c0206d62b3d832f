use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, bail};
use chrono::NaiveDate;
use clap::Parser;

use stain_quant_rs::image_pipeline::{
    BatchPipeline, CsvRecordWriter, FailurePolicy, QuantConfig, RecordWriter, WellIdParser,
    discover_images,
};
use stain_quant_rs::logger::{self, error, info};

#[derive(Parser)]
#[command(name = "stain-quant")]
#[command(version, about = "Quantify stain intensity across plate microscopy images", long_about = None)]
struct Cli {
    /// Image files or directories
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// Descend into subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// Gaussian sigma of the background estimate, in pixels
    #[arg(long, value_name = "PIXELS", default_value = "50.0")]
    sigma: f32,

    /// Fraction of each border cropped before aggregation, in [0, 0.5)
    #[arg(long, value_name = "FRACTION", default_value = "0.05")]
    crop: f64,

    /// Output CSV file (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Skip images that fail instead of aborting the batch
    #[arg(long)]
    skip_failed: bool,

    /// Number of worker threads
    #[arg(short = 'j', long, value_name = "N")]
    threads: Option<usize>,

    /// Process images one at a time
    #[arg(long)]
    sequential: bool,

    /// Delimiter separating file name tokens
    #[arg(long, value_name = "CHAR", default_value = "_")]
    well_delimiter: char,

    /// Zero-based token holding the well identifier
    #[arg(long, value_name = "INDEX", default_value = "0")]
    well_position: usize,

    /// Date stamped on every record (YYYY-MM-DD, default today)
    #[arg(long, value_name = "DATE")]
    date: Option<NaiveDate>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn build_config(cli: &Cli) -> QuantConfig {
    let mut builder = QuantConfig::builder()
        .sigma(cli.sigma)
        .crop_fraction(cli.crop)
        .failure_policy(if cli.skip_failed {
            FailurePolicy::SkipAndContinue
        } else {
            FailurePolicy::FailFast
        })
        .parallel(!cli.sequential)
        .threads(cli.threads)
        .well_parser(WellIdParser::new(cli.well_delimiter, cli.well_position));
    if let Some(date) = cli.date {
        builder = builder.processing_date(date);
    }
    builder.build()
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let images = discover_images(&cli.inputs, cli.recursive).context("Failed to collect inputs")?;
    if images.is_empty() {
        bail!("No supported image files found (tif, tiff, png, jpg, jpeg, bmp)");
    }
    info!("Found {} image files", images.len());

    let pipeline = BatchPipeline::new(build_config(&cli)).context("Invalid configuration")?;
    let records = pipeline.run(&images)?;

    let mut output: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    };
    CsvRecordWriter.write_records(&records, &mut output)?;
    output.flush()?;

    match &cli.output {
        Some(path) => info!("Wrote {} records to {}", records.len(), path.display()),
        None => info!("Wrote {} records", records.len()),
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    info!("Starting stain-quant...");

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Quantification failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
