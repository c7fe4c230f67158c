//! Typed per-station rows.

use crate::error::{DataError, Result};
use crate::schema;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// One row of the station table.
///
/// `total_incidents`, `heinous_ratio` and `safety_index` are optional: the
/// source data leaves them blank for stations with incomplete records, and
/// the pipeline stages degrade per-row rather than reject the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    /// District the station belongs to.
    pub district_name: String,
    /// Station identifier, unique within the district.
    pub unit_name: String,
    /// First year with recorded incidents.
    pub first_year: i32,
    /// Last year with recorded incidents.
    pub last_year: i32,
    /// Number of years with records.
    pub years_recorded: i32,
    /// Aggregate incident count over the recorded span.
    pub total_incidents: Option<f64>,
    /// Fraction of incidents classified heinous, in [0, 1].
    pub heinous_ratio: Option<f64>,
    /// Composite safety score, higher = safer.
    pub safety_index: Option<f64>,
}

/// Extract one [`StationRecord`] per row of a validated station table.
///
/// Numeric columns are cast to their canonical types first, so integer and
/// float encodings of the same column both load.
///
/// # Errors
/// [`DataError::NullValue`] if an identity or year cell is null, or a
/// polars error if a column cannot be cast.
pub fn station_records(df: &DataFrame) -> Result<Vec<StationRecord>> {
    schema::validate_required(df)?;

    let districts = df.column(schema::DISTRICT_NAME)?.str()?;
    let units = df.column(schema::UNIT_NAME)?.str()?;
    let first_years = df.column(schema::FIRST_YEAR)?.cast(&DataType::Int32)?;
    let first_years = first_years.i32()?;
    let last_years = df.column(schema::LAST_YEAR)?.cast(&DataType::Int32)?;
    let last_years = last_years.i32()?;
    let years = df.column(schema::YEARS_RECORDED)?.cast(&DataType::Int32)?;
    let years = years.i32()?;
    let totals = df.column(schema::TOTAL_INCIDENTS)?.cast(&DataType::Float64)?;
    let totals = totals.f64()?;
    let ratios = df.column(schema::HEINOUS_RATIO)?.cast(&DataType::Float64)?;
    let ratios = ratios.f64()?;
    let safety = df.column(schema::SAFETY_INDEX)?.cast(&DataType::Float64)?;
    let safety = safety.f64()?;

    let mut records = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        records.push(StationRecord {
            district_name: required_str(districts, schema::DISTRICT_NAME, row)?.to_string(),
            unit_name: required_str(units, schema::UNIT_NAME, row)?.to_string(),
            first_year: required_i32(first_years, schema::FIRST_YEAR, row)?,
            last_year: required_i32(last_years, schema::LAST_YEAR, row)?,
            years_recorded: required_i32(years, schema::YEARS_RECORDED, row)?,
            total_incidents: totals.get(row),
            heinous_ratio: ratios.get(row),
            safety_index: safety.get(row),
        });
    }
    Ok(records)
}

fn required_str<'a>(values: &'a StringChunked, column: &str, row: usize) -> Result<&'a str> {
    values.get(row).ok_or_else(|| DataError::NullValue {
        column: column.to_string(),
        row,
    })
}

fn required_i32(values: &Int32Chunked, column: &str, row: usize) -> Result<i32> {
    values.get(row).ok_or_else(|| DataError::NullValue {
        column: column.to_string(),
        row,
    })
}
