use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dent_data::CatalogLoader;
use tracing_subscriber::EnvFilter;

/// Validate a treatment-category catalog CSV and optionally emit the JSON
/// snapshot bundled with the app.
///
/// The CSV file should have the following columns:
/// - id: Unique category identifier
/// - name: Display name
/// - description: Optional free text (leave empty for none)
/// - base_cost: Default price, must be greater than zero
#[derive(Parser, Debug)]
#[command(name = "dent-catalog-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing catalog data
    #[arg(short, long)]
    file: PathBuf,

    /// Write the validated catalog as a JSON snapshot to this path
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    println!("Loading catalog from: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let categories = CatalogLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!("Parsed {} categories from CSV", categories.len());

    for category in &categories {
        println!("  {:<8} {:<24} {}", category.id, category.name, category.base_cost);
    }

    if let Some(out) = &args.out {
        let json = serde_json::to_string_pretty(&categories)
            .context("Failed to serialize catalog snapshot")?;
        std::fs::write(out, json)
            .with_context(|| format!("Failed to write snapshot: {}", out.display()))?;
        println!("Wrote catalog snapshot to {}", out.display());
    }

    Ok(())
}
