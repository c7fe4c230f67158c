//! End-to-end pipeline demo on an in-memory station table.
//!
//! Run with: cargo run --example pipeline_demo

use kotwal::pipeline::{ClusterJobConfig, TrendJobConfig, enrich_with_risk_tier, forecast_trends};
use kotwal::data::schema;
use kotwal::output::{ExportFormat, Exporter};
use polars::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let df = df![
        schema::DISTRICT_NAME => ["N", "N", "S", "S", "E", "E", "W", "W"],
        schema::UNIT_NAME => ["a", "b", "c", "d", "e", "f", "g", "h"],
        schema::FIRST_YEAR => [2015i32; 8],
        schema::LAST_YEAR => [2020i32; 8],
        schema::YEARS_RECORDED => [6i32; 8],
        schema::TOTAL_INCIDENTS => [
            60000.0, 60000.0, 42000.0, 42000.0, 24000.0, 24000.0, 6000.0, 6000.0
        ],
        schema::HEINOUS_RATIO => [0.5, 0.5, 0.4, 0.4, 0.3, 0.3, 0.2, 0.2],
        schema::SAFETY_INDEX => [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0],
    ]?;

    println!("=== Risk clustering ===");
    let enriched = enrich_with_risk_tier(&df, &ClusterJobConfig::default())?;
    println!("{}", enriched.select([schema::UNIT_NAME, schema::SAFETY_INDEX, schema::RISK_TIER])?);

    println!("=== Trend forecasts ===");
    let rows = forecast_trends(&enriched, &TrendJobConfig::default())?;
    println!("{}", rows.export_to_string(ExportFormat::PrettyJson)?);

    Ok(())
}
