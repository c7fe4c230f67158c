//! Batch pipeline orchestration.
//!
//! Two independent jobs share the tabular I/O contract: the clustering
//! job appends a `risk_tier` column to the station table, the trend job
//! emits one forecast row per station. Each job reads one input table,
//! validates the required columns, computes everything in memory, and
//! only then writes its single output file, so a fatal error never
//! leaves partial output behind.

pub mod cluster;
pub mod trend;

pub use cluster::{ClusterJobConfig, enrich_with_risk_tier, run_cluster_job};
pub use trend::{TrendJobConfig, forecast_trends, resolve_trend_input, run_trend_job};

use thiserror::Error;

/// Errors that can abort a pipeline job.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Table loading or validation error
    #[error("Data error: {0}")]
    Data(#[from] kotwal_data::DataError),

    /// Feature preparation error
    #[error("Feature error: {0}")]
    Feature(#[from] kotwal_risk::FeatureError),

    /// Clustering error
    #[error("Clustering error: {0}")]
    Cluster(#[from] kotwal_risk::ClusterError),

    /// Tier labelling error
    #[error("Tier error: {0}")]
    Tier(#[from] kotwal_risk::TierError),

    /// Output writing error
    #[error("Export error: {0}")]
    Export(#[from] kotwal_output::ExportError),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}
