//! heatsink-designer CLI
//!
//! Samples random heatsink designs, builds and measures them, and writes a
//! CSV of results plus a study document.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use heatsink_designer::metrics::ThermalModel;
use heatsink_designer::study::{DesignStudy, StudyConfig};

#[derive(Parser)]
#[command(name = "heatsink-designer")]
#[command(about = "Parametric heatsink design study", long_about = None)]
struct Cli {
    /// TOML file with study settings; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Nominal footprint in mm (50-200)
    #[arg(short, long)]
    base_size: Option<u32>,

    /// Number of designs to generate (1-15)
    #[arg(short, long)]
    num_designs: Option<u32>,

    /// Existing directory that receives heatsink_results_<stamp>.csv and the
    /// JSON study document heatsink_designs_<stamp>.json
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Seed for a reproducible study
    #[arg(short, long)]
    seed: Option<u64>,

    /// Heat dissipation formula: legacy or corrected
    #[arg(short, long)]
    thermal_model: Option<ThermalModel>,
}

impl Cli {
    fn into_config(self) -> Result<StudyConfig> {
        let mut config = match &self.config {
            Some(path) => StudyConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => StudyConfig::default(),
        };
        if let Some(base_size) = self.base_size {
            config.base_size = base_size;
        }
        if let Some(num_designs) = self.num_designs {
            config.num_designs = num_designs;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(thermal_model) = self.thermal_model {
            config = config.with_thermal_model(thermal_model);
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    // Default: INFO. Override with RUST_LOG (e.g. RUST_LOG=heatsink_designer=debug).
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Cli::parse().into_config()?;
    let study = DesignStudy::new(config).context("invalid study settings")?;
    let outcome = study.run().context("design study failed")?;

    println!("{}", outcome.summary);
    if !outcome.failures.is_empty() {
        println!("{} design(s) failed and were skipped", outcome.failures.len());
    }
    println!("Results saved to:");
    println!("  {}", outcome.csv_path.display());
    println!("  {}", outcome.document_path.display());
    Ok(())
}
