//! CSV loading for station tables.

use crate::error::{DataError, Result};
use crate::schema;
use polars::prelude::*;
use std::path::Path;

/// Load a station table from CSV and validate its required columns.
///
/// The file's existence is checked before any read so a missing input
/// surfaces as [`DataError::MissingInput`] rather than a bare IO error.
///
/// # Errors
/// [`DataError::MissingInput`] if the file does not exist,
/// [`DataError::MissingColumn`] if a required column is absent, or a
/// polars error if the CSV cannot be parsed.
pub fn load_station_table(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(DataError::MissingInput {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    schema::validate_required(&df)?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        let err = load_station_table(&path).unwrap_err();
        assert!(matches!(err, DataError::MissingInput { .. }));
    }

    #[test]
    fn test_load_and_validate_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stations.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "district_name,unit_name,first_year,last_year,years_recorded,total_incidents,heinous_ratio,safety_index"
        )
        .unwrap();
        writeln!(file, "North,Alpha,2015,2020,6,120,0.1,55.0").unwrap();
        writeln!(file, "South,Beta,2016,2020,5,,0.3,40.0").unwrap();
        drop(file);

        let df = load_station_table(&path).unwrap();
        assert_eq!(df.height(), 2);
        // The empty total_incidents cell parses as null, not as zero.
        assert_eq!(df.column("total_incidents").unwrap().null_count(), 1);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "district_name,unit_name").unwrap();
        writeln!(file, "North,Alpha").unwrap();
        drop(file);

        let err = load_station_table(&path).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn { .. }));
    }
}
