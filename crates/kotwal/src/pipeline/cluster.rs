//! Risk clustering job.
//!
//! Validates the station table, derives the per-year incident rate on a
//! working copy, clusters the imputed feature matrix with seeded k-means,
//! ranks clusters by ascending mean safety index, and appends the tier
//! label to the original table. Internal cluster ids and ranks never reach
//! the output.

use crate::pipeline::PipelineError;
use kotwal_data::schema;
use kotwal_risk::{KMeans, KMeansConfig, RiskTier, assign_tiers, feature_matrix, tier};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Feature columns clustered over, in matrix column order.
const FEATURE_COLUMNS: [&str; 3] = [
    schema::INCIDENTS_PER_YEAR,
    schema::HEINOUS_RATIO,
    schema::SAFETY_INDEX,
];

/// Configuration for the clustering job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterJobConfig {
    /// K-means parameters.
    pub kmeans: KMeansConfig,

    /// Tier per ascending-safety rank. Labelling fails loudly if the
    /// partition does not produce exactly this many clusters.
    pub tiers: Vec<RiskTier>,
}

impl Default for ClusterJobConfig {
    fn default() -> Self {
        Self {
            kmeans: KMeansConfig::default(),
            tiers: tier::DEFAULT_TIER_TABLE.to_vec(),
        }
    }
}

/// Cluster the stations and return the table with a `risk_tier` column.
///
/// The input frame is left untouched; the derived per-year rate exists
/// only on the job's working copy.
///
/// # Errors
/// Fatal per the job contract: missing required column, empty table or
/// `k` above the station count, or a cluster count that does not match
/// the tier table.
pub fn enrich_with_risk_tier(
    df: &DataFrame,
    config: &ClusterJobConfig,
) -> Result<DataFrame, PipelineError> {
    kotwal_data::validate_required(df)?;

    let working = derive_incidents_per_year(df)?;
    let features = feature_matrix(&working, &FEATURE_COLUMNS)?;
    let fit = KMeans::new(config.kmeans.clone()).fit(&features)?;

    let safety = observed_safety(df)?;
    let tiers = assign_tiers(&fit.assignments, &safety, &config.tiers)?;
    let labels: Vec<&str> = tiers.iter().map(RiskTier::label).collect();

    let mut enriched = df.clone();
    enriched.with_column(Column::new(schema::RISK_TIER.into(), labels))?;
    Ok(enriched)
}

/// Run the clustering job: load, enrich, write. Returns the row count.
///
/// # Errors
/// Any fatal error from loading, clustering or writing; nothing is
/// written unless the whole table was labelled.
pub fn run_cluster_job(
    input: &Path,
    output: &Path,
    config: &ClusterJobConfig,
) -> Result<usize, PipelineError> {
    let df = kotwal_data::load_station_table(input)?;
    let mut enriched = enrich_with_risk_tier(&df, config)?;
    kotwal_output::write_station_table(&mut enriched, output)?;
    Ok(enriched.height())
}

/// Add `incidents_per_year = total_incidents / years_recorded` to a copy
/// of the table, null where the rate is undefined.
fn derive_incidents_per_year(df: &DataFrame) -> Result<DataFrame, PolarsError> {
    df.clone()
        .lazy()
        .with_column(
            when(col(schema::YEARS_RECORDED).cast(DataType::Int64).gt(lit(0)))
                .then(
                    col(schema::TOTAL_INCIDENTS).cast(DataType::Float64)
                        / col(schema::YEARS_RECORDED).cast(DataType::Float64),
                )
                .otherwise(lit(NULL))
                .alias(schema::INCIDENTS_PER_YEAR),
        )
        .collect()
}

/// Observed safety index per station, nulls preserved: ranking means skip
/// missing values rather than use imputed ones.
fn observed_safety(df: &DataFrame) -> Result<Vec<Option<f64>>, PipelineError> {
    let safety = df.column(schema::SAFETY_INDEX)?.cast(&DataType::Float64)?;
    let safety = safety.f64()?;
    Ok(safety.into_iter().collect())
}
