//! Integration tests for the clustering and trend jobs.

use kotwal::pipeline::{
    ClusterJobConfig, TrendJobConfig, enrich_with_risk_tier, resolve_trend_input, run_cluster_job,
    run_trend_job,
};
use kotwal::{data::schema, output::write_station_table};
use polars::prelude::*;
use std::collections::HashMap;
use std::path::Path;

/// Eight stations in four well-separated incident-rate groups of two,
/// safety index spread evenly from 10 to 80.
fn eight_station_frame() -> DataFrame {
    df![
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
    ]
    .unwrap()
}

fn tier_labels(df: &DataFrame) -> Vec<String> {
    df.column(schema::RISK_TIER)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap().to_string())
        .collect()
}

fn write_input(df: &DataFrame, path: &Path) {
    let mut df = df.clone();
    write_station_table(&mut df, path).unwrap();
}

#[test]
fn test_end_to_end_two_stations_per_tier() {
    let df = eight_station_frame();
    let enriched = enrich_with_risk_tier(&df, &ClusterJobConfig::default()).unwrap();
    let labels = tier_labels(&enriched);

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in &labels {
        *counts.entry(label.as_str()).or_default() += 1;
    }
    for tier in ["CRITICAL", "HIGH", "MEDIUM", "LOW"] {
        assert_eq!(counts[tier], 2, "expected 2 stations in {tier}");
    }

    // The two lowest safety_index stations form the CRITICAL tier.
    assert_eq!(labels[0], "CRITICAL");
    assert_eq!(labels[1], "CRITICAL");
    assert_eq!(labels[6], "LOW");
    assert_eq!(labels[7], "LOW");
}

#[test]
fn test_tier_means_are_monotone_in_safety() {
    let df = eight_station_frame();
    let enriched = enrich_with_risk_tier(&df, &ClusterJobConfig::default()).unwrap();
    let labels = tier_labels(&enriched);
    let safety = enriched.column(schema::SAFETY_INDEX).unwrap().f64().unwrap();

    let mut sums: HashMap<String, (f64, usize)> = HashMap::new();
    for (label, value) in labels.iter().zip(safety.into_iter()) {
        let entry = sums.entry(label.clone()).or_default();
        entry.0 += value.unwrap();
        entry.1 += 1;
    }
    let mean = |tier: &str| {
        let (sum, count) = sums[tier];
        sum / count as f64
    };

    assert!(mean("CRITICAL") <= mean("HIGH"));
    assert!(mean("HIGH") <= mean("MEDIUM"));
    assert!(mean("MEDIUM") <= mean("LOW"));
}

#[test]
fn test_clustering_is_deterministic_across_runs() {
    let df = eight_station_frame();
    let config = ClusterJobConfig::default();
    let first = enrich_with_risk_tier(&df, &config).unwrap();
    let second = enrich_with_risk_tier(&df, &config).unwrap();
    assert!(first.equals(&second));
}

#[test]
fn test_cluster_job_writes_byte_identical_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("stations.csv");
    write_input(&eight_station_frame(), &input);

    let out_a = dir.path().join("with_risk_a.csv");
    let out_b = dir.path().join("with_risk_b.csv");
    let config = ClusterJobConfig::default();
    let rows_a = run_cluster_job(&input, &out_a, &config).unwrap();
    let rows_b = run_cluster_job(&input, &out_b, &config).unwrap();

    assert_eq!(rows_a, 8);
    assert_eq!(rows_b, 8);
    assert_eq!(
        std::fs::read(&out_a).unwrap(),
        std::fs::read(&out_b).unwrap()
    );
}

#[test]
fn test_trend_job_is_idempotent_on_enriched_table() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("stations.csv");
    let enriched = dir.path().join("with_risk.csv");
    write_input(&eight_station_frame(), &input);
    run_cluster_job(&input, &enriched, &ClusterJobConfig::default()).unwrap();

    let out_a = dir.path().join("trends_a.csv");
    let out_b = dir.path().join("trends_b.csv");
    let config = TrendJobConfig::default();
    let rows_a = run_trend_job(&enriched, &out_a, &config).unwrap();
    let rows_b = run_trend_job(&enriched, &out_b, &config).unwrap();

    assert_eq!(rows_a, 8);
    assert_eq!(rows_b, 8);
    assert_eq!(
        std::fs::read(&out_a).unwrap(),
        std::fs::read(&out_b).unwrap()
    );

    let written = std::fs::read_to_string(&out_a).unwrap();
    assert!(written.starts_with(
        "district_name,unit_name,predicted_next_year_value,trend_direction"
    ));
    assert_eq!(written.lines().count(), 9);
}

#[test]
fn test_trend_job_degrades_to_base_table() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("stations.csv");
    let enriched = dir.path().join("with_risk.csv");
    write_input(&eight_station_frame(), &base);

    // No enriched file yet: the base table is used.
    assert_eq!(resolve_trend_input(&enriched, &base), base);

    let output = dir.path().join("trends.csv");
    let rows = run_trend_job(
        &resolve_trend_input(&enriched, &base),
        &output,
        &TrendJobConfig::default(),
    )
    .unwrap();
    assert_eq!(rows, 8);

    // Once the clustering job has run, the enriched table wins.
    run_cluster_job(&base, &enriched, &ClusterJobConfig::default()).unwrap();
    assert_eq!(resolve_trend_input(&enriched, &base), enriched);
}

#[test]
fn test_fatal_validation_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("incomplete.csv");
    let df = eight_station_frame().drop(schema::SAFETY_INDEX).unwrap();
    write_input(&df, &input);

    let output = dir.path().join("with_risk.csv");
    assert!(run_cluster_job(&input, &output, &ClusterJobConfig::default()).is_err());
    assert!(!output.exists());

    let trends = dir.path().join("trends.csv");
    assert!(run_trend_job(&input, &trends, &TrendJobConfig::default()).is_err());
    assert!(!trends.exists());
}

#[test]
fn test_missing_input_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("absent.csv");
    let output = dir.path().join("with_risk.csv");
    let err = run_cluster_job(&input, &output, &ClusterJobConfig::default()).unwrap_err();
    assert!(err.to_string().contains("Input table missing"));
    assert!(!output.exists());
}
