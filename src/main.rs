//! Storefront asset tool
//!
//! Generates the synthetic sound effects used by the mini-games and UI,
//! checks shipped files against fresh renders, and computes product
//! compositing placements for the image pipeline.
//!
//! ## Output Layout
//!
//! - `<base>/mini-games/<game>/<effect>.mp3`
//! - `<base>/ui/<effect>.mp3`
//!
//! The files are 44.1 kHz mono 16-bit WAV regardless of extension.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use storefront_assets::catalog::Catalog;
use storefront_assets::layout::{CompositeParams, compute_placement};
use tracing::info;

#[derive(Parser)]
#[command(name = "storefront-assets", version)]
#[command(about = "Generate storefront sound effects and compositing layouts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every catalog sound to disk
    Generate {
        /// Output directory (defaults to the catalog base)
        #[arg(short, long)]
        base: Option<PathBuf>,
        /// JSON catalog to use instead of the built-in one
        #[arg(short, long)]
        catalog: Option<PathBuf>,
        /// Only generate these groups (repeatable)
        #[arg(short, long = "group")]
        groups: Vec<String>,
        /// Write a JSON manifest of the generated files
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },
    /// List catalog entries with their lengths
    List {
        /// JSON catalog to use instead of the built-in one
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
    /// Check files on disk against fresh renders
    Verify {
        /// Directory to check (defaults to the catalog base)
        #[arg(short, long)]
        base: Option<PathBuf>,
        /// JSON catalog to use instead of the built-in one
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
    /// Compute where a product lands on a background
    Layout {
        /// Background size as WIDTHxHEIGHT
        #[arg(long, value_parser = parse_size)]
        background: (u32, u32),
        /// Cropped product size as WIDTHxHEIGHT
        #[arg(long, value_parser = parse_size)]
        product: (u32, u32),
        /// Composite parameters as JSON
        #[arg(long, default_value = "{}")]
        params: String,
    },
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
    let h = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
    Ok((w, h))
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::from_json_file(path)
            .with_context(|| format!("Failed to load catalog {}", path.display())),
        None => Ok(Catalog::storefront()),
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate {
            base,
            catalog,
            groups,
            manifest,
        } => {
            let catalog = load_catalog(catalog.as_deref())?;
            for group in &groups {
                if !catalog.groups().contains(&group.as_str()) {
                    bail!("Unknown group '{group}'");
                }
            }
            let catalog = catalog.select(groups.as_slice());
            let base = base.unwrap_or_else(|| catalog.base.clone());

            info!("Generating {} sounds", catalog.entries.len());
            let result = catalog
                .generate(&base)
                .context("Sound generation failed")?;

            if let Some(path) = manifest {
                result
                    .write_json(&path)
                    .with_context(|| format!("Failed to write manifest {}", path.display()))?;
                info!(path = %path.display(), "manifest written");
            }
            info!("All sounds generated in {}", base.display());
        }
        Commands::List { catalog } => {
            let catalog = load_catalog(catalog.as_deref())?;
            for entry in &catalog.entries {
                let wave = entry.recipe.render();
                println!(
                    "{:<10} {:<40} {:>7} samples {:>6.3}s",
                    entry.group,
                    entry.path,
                    wave.len(),
                    wave.duration()
                );
            }
        }
        Commands::Verify { base, catalog } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let base = base.unwrap_or_else(|| catalog.base.clone());
            let report = catalog.verify(&base).context("Verification failed")?;
            info!(
                matched = report.matched.len(),
                mismatched = report.mismatched.len(),
                missing = report.missing.len(),
                "verified {}",
                base.display()
            );
            if !report.is_clean() {
                bail!(
                    "{} mismatched, {} missing under {}",
                    report.mismatched.len(),
                    report.missing.len(),
                    base.display()
                );
            }
        }
        Commands::Layout {
            background,
            product,
            params,
        } => {
            let params =
                CompositeParams::from_json_str(&params).context("Invalid composite parameters")?;
            let placement = compute_placement(background, product, &params)?;
            println!("{}", serde_json::to_string(&placement)?);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
