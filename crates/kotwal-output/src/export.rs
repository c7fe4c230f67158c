//! Export of pipeline output tables.
//!
//! Trend rows serialize through serde to CSV (the format the serving
//! layer joins on) or JSON; enriched station tables are written as CSV
//! straight from the DataFrame. All content is produced in memory before
//! any file is created, so a failing job leaves no partial output.

use kotwal_trend::TrendDirection;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Polars error.
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

/// Trend forecast for a single station, in output-table column order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendExport {
    /// District the station belongs to.
    pub district_name: String,

    /// Station identifier within the district.
    pub unit_name: String,

    /// Forecast incident count for next year, rounded to 2 decimals.
    pub predicted_next_year_value: f64,

    /// Classified trend direction.
    pub trend_direction: TrendDirection,
}

impl TrendExport {
    /// Create a new trend export row; the prediction is rounded here so
    /// every output surface carries the same value.
    pub fn new(
        district_name: String,
        unit_name: String,
        predicted: f64,
        trend_direction: TrendDirection,
    ) -> Self {
        Self {
            district_name,
            unit_name,
            predicted_next_year_value: round2(predicted),
            trend_direction,
        }
    }
}

/// Round to 2 decimal places, half away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

impl Exporter for Vec<TrendExport> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                for record in self {
                    wtr.serialize(record)?;
                }
                let data =
                    String::from_utf8(wtr.into_inner().map_err(|e| e.into_error())?).unwrap();
                Ok(data)
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

/// Write a station table as CSV with headers, columns in frame order.
///
/// # Errors
///
/// Returns an error if the file cannot be created or the frame cannot be
/// serialized.
pub fn write_station_table(df: &mut DataFrame, path: &Path) -> Result<(), ExportError> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<TrendExport> {
        vec![
            TrendExport::new(
                "North".to_string(),
                "Alpha".to_string(),
                12.3456,
                TrendDirection::Increasing,
            ),
            TrendExport::new(
                "South".to_string(),
                "Beta".to_string(),
                0.0,
                TrendDirection::Stable,
            ),
        ]
    }

    #[test]
    fn test_round2_at_construction() {
        let rows = sample_rows();
        assert_eq!(rows[0].predicted_next_year_value, 12.35);
    }

    #[test]
    fn test_csv_header_and_labels() {
        let csv = sample_rows().export_to_string(ExportFormat::Csv).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("district_name,unit_name,predicted_next_year_value,trend_direction")
        );
        assert_eq!(lines.next(), Some("North,Alpha,12.35,increasing"));
        assert_eq!(lines.next(), Some("South,Beta,0.0,stable"));
    }

    #[test]
    fn test_json_directions_are_lowercase() {
        let json = sample_rows().export_to_string(ExportFormat::Json).unwrap();
        assert!(json.contains("\"trend_direction\":\"increasing\""));
        assert!(json.contains("\"predicted_next_year_value\":12.35"));
    }

    #[test]
    fn test_extension() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::PrettyJson.extension(), "json");
    }

    #[test]
    fn test_station_table_roundtrips_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let mut df = df![
            "unit_name" => ["Alpha"],
            "risk_tier" => ["HIGH"],
        ]
        .unwrap();
        write_station_table(&mut df, &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("unit_name,risk_tier"));
    }
}
