//! Trend forecasting job.
//!
//! Builds each station's synthetic yearly series, fits the trend line,
//! and writes one forecast row per station. The fit is total: stations
//! with degenerate records (no total, no recorded years, inverted span)
//! come out flat rather than failing the job.

use crate::pipeline::PipelineError;
use kotwal_output::{ExportFormat, Exporter, TrendExport};
use kotwal_trend::{SeriesConfig, TrendConfig, fit_trend, synthetic_series};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the trend job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendJobConfig {
    /// Synthetic series parameters.
    pub series: SeriesConfig,

    /// Trend classification parameters.
    pub trend: TrendConfig,
}

/// Compute one forecast row per station, in table row order.
///
/// # Errors
/// Fatal only on a missing required column or an unreadable row; per-row
/// data quality never aborts the job.
pub fn forecast_trends(
    df: &polars::prelude::DataFrame,
    config: &TrendJobConfig,
) -> Result<Vec<TrendExport>, PipelineError> {
    let records = kotwal_data::station_records(df)?;

    Ok(records
        .into_iter()
        .map(|record| {
            let series = synthetic_series(&record, &config.series);
            let fitted = fit_trend(&series, &config.trend);
            TrendExport::new(
                record.district_name,
                record.unit_name,
                fitted.predicted,
                fitted.direction,
            )
        })
        .collect())
}

/// Prefer the risk-enriched table when its file exists; degrade to the
/// base table otherwise. The trend job has no hard dependency on the
/// clustering job's output.
pub fn resolve_trend_input(enriched: &Path, base: &Path) -> PathBuf {
    if enriched.exists() {
        enriched.to_path_buf()
    } else {
        base.to_path_buf()
    }
}

/// Run the trend job: load, forecast, write. Returns the row count.
///
/// # Errors
/// Any fatal error from loading or writing; nothing is written unless
/// every station was forecast.
pub fn run_trend_job(
    input: &Path,
    output: &Path,
    config: &TrendJobConfig,
) -> Result<usize, PipelineError> {
    let df = kotwal_data::load_station_table(input)?;
    let rows = forecast_trends(&df, config)?;
    rows.export_to_file(output, ExportFormat::Csv)?;
    Ok(rows.len())
}
