//! Kotwal CLI binary.
//!
//! Runs the two batch jobs of the pipeline: risk clustering and trend
//! forecasting. Each job reads one CSV table and writes one CSV table;
//! fatal errors exit non-zero without producing an output file.

use clap::{Parser, Subcommand};
use kotwal::pipeline::{
    ClusterJobConfig, TrendJobConfig, resolve_trend_input, run_cluster_job, run_trend_job,
};
use kotwal::risk::KMeansConfig;
use kotwal::trend::{SeriesConfig, TrendConfig};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "kotwal")]
#[command(about = "Kotwal: station risk tiers and incident trend forecasts", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cluster stations into risk tiers
    Cluster {
        /// Input station table (CSV)
        #[arg(long)]
        input: PathBuf,

        /// Output path for the risk-enriched table
        #[arg(long)]
        output: PathBuf,

        /// Number of clusters
        #[arg(long, default_value = "4")]
        clusters: usize,

        /// RNG seed for centroid initialization
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Forecast next-year incident counts per station
    Trend {
        /// Base station table (CSV)
        #[arg(long)]
        input: PathBuf,

        /// Risk-enriched table, preferred over the base table when present
        #[arg(long)]
        enriched: Option<PathBuf>,

        /// Output path for the trend table
        #[arg(long)]
        output: PathBuf,

        /// Slope magnitude beyond which a trend counts as moving
        #[arg(long, default_value = "0.5")]
        slope_threshold: f64,

        /// Fraction of the yearly average the synthetic ramp may swing by
        #[arg(long, default_value = "0.2")]
        ramp_scale: f64,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Cluster {
            input,
            output,
            clusters,
            seed,
        } => {
            let config = ClusterJobConfig {
                kmeans: KMeansConfig {
                    k: clusters,
                    seed,
                    ..Default::default()
                },
                ..Default::default()
            };
            let rows = run_cluster_job(&input, &output, &config)?;
            println!("Wrote risk-enriched table: {} ({} rows)", output.display(), rows);
        }
        Commands::Trend {
            input,
            enriched,
            output,
            slope_threshold,
            ramp_scale,
        } => {
            let resolved = match enriched {
                Some(ref path) => resolve_trend_input(path, &input),
                None => input,
            };
            let config = TrendJobConfig {
                series: SeriesConfig { ramp_scale },
                trend: TrendConfig { slope_threshold },
            };
            let rows = run_trend_job(&resolved, &output, &config)?;
            println!("Wrote trend table: {} ({} rows)", output.display(), rows);
        }
    }

    Ok(())
}
