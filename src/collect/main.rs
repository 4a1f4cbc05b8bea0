//! Boundary collection pipeline.
//!
//! Loads parsed boundary datasets, selects the requested county and
//! town, applies the bundled correction table, and writes the per-tier
//! entity mappings for downstream rendering.

mod config;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use camphor::corrections::CorrectionTable;
use camphor::models::BoundaryDataset;
use camphor::{collect_boundaries, TierDatasets};

use crate::config::{Config, TierConfig};

#[derive(Parser, Debug)]
#[command(name = "collect")]
#[command(about = "Collect administrative boundary shapes for one county and town")]
struct Args {
    /// County to select (e.g. 臺北市)
    county: String,

    /// Town or district to select (e.g. 南港區)
    town: String,

    /// Run configuration listing the boundary dataset files
    #[arg(long, default_value = "boundaries.toml")]
    config: PathBuf,

    /// Output directory for the collected document
    #[arg(long, default_value = "shapes")]
    out_dir: PathBuf,
}

/// Read and concatenate one tier's interchange files, recording their
/// names for the output metadata.
fn load_tier(tier_config: &TierConfig, source_files: &mut Vec<String>) -> Result<BoundaryDataset> {
    let mut dataset = BoundaryDataset::default();

    for path in &tier_config.paths {
        let file = File::open(path)
            .with_context(|| format!("Failed to open dataset {}", path.display()))?;
        let part: BoundaryDataset = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse dataset {}", path.display()))?;
        part.validate()
            .with_context(|| format!("Misaligned dataset {}", path.display()))?;

        info!(
            "{}: {} shapes, {} records",
            path.display(),
            part.shapes.len(),
            part.records.len()
        );
        source_files.push(path.display().to_string());
        dataset.extend(part);
    }

    Ok(dataset)
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Camphor boundary collection");
    info!("Target: {} {}", args.county, args.town);

    let config = Config::load_from_file(&args.config)?;
    let corrections = CorrectionTable::bundled()?;

    let mut source_files = Vec::new();
    let datasets = TierDatasets {
        towns: load_tier(&config.towns, &mut source_files)?,
        villages: load_tier(&config.villages, &mut source_files)?,
        neighborhoods: load_tier(&config.neighborhoods, &mut source_files)?,
        source_files,
    };

    let collected = collect_boundaries(&datasets, &args.county, &args.town, &corrections)?;
    info!(
        "collected {} towns, {} villages, {} neighborhoods",
        collected.towns.len(),
        collected.villages.len(),
        collected.neighborhoods.len()
    );

    std::fs::create_dir_all(&args.out_dir).with_context(|| {
        format!("Failed to create output directory {}", args.out_dir.display())
    })?;
    let out_path = args
        .out_dir
        .join(format!("{}_{}.json", args.county, args.town));
    collected.save_to_file(&out_path)?;
    info!("generated file: {}", out_path.display());

    Ok(())
}
