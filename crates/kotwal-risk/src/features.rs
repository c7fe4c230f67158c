//! Feature matrix preparation.
//!
//! Builds the clustering matrix from the station table: one row per
//! station, one column per feature, every missing or NaN cell replaced by
//! that column's median over the observed values. Nothing non-finite
//! reaches the clustering step.

use ndarray::Array2;
use polars::prelude::*;
use thiserror::Error;

/// Errors that can occur during feature preparation.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// A required feature column is absent from the table
    #[error("Missing required feature column: {0}")]
    MissingColumn(String),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Build the imputed feature matrix for the given columns.
///
/// Columns are cast to f64 and imputed independently; the input frame is
/// not mutated.
///
/// # Errors
/// [`FeatureError::MissingColumn`] if any feature column is absent.
pub fn feature_matrix(
    df: &DataFrame,
    feature_columns: &[&str],
) -> Result<Array2<f64>, FeatureError> {
    let mut matrix = Array2::<f64>::zeros((df.height(), feature_columns.len()));

    for (j, name) in feature_columns.iter().enumerate() {
        let column = df
            .column(name)
            .map_err(|_| FeatureError::MissingColumn((*name).to_string()))?;
        let values = column.cast(&DataType::Float64)?;
        let values = values.f64()?;
        for (i, value) in impute_median(values).into_iter().enumerate() {
            matrix[[i, j]] = value;
        }
    }

    Ok(matrix)
}

/// Replace nulls and NaNs with the median of the observed values.
fn impute_median(values: &Float64Chunked) -> Vec<f64> {
    let mut observed: Vec<f64> = values
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .collect();
    let fill = median(&mut observed);
    values
        .into_iter()
        .map(|v| match v {
            Some(x) if x.is_finite() => x,
            _ => fill,
        })
        .collect()
}

/// Median of a slice, averaging the two middle values for even lengths.
/// Zero when the slice is empty.
fn median(values: &mut [f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}
