//! Station table schema.
//!
//! The base table carries one row per station with a fixed set of required
//! columns. Enrichment columns added by the pipeline jobs (`risk_tier`, the
//! trend fields) are optional on input; their presence is reported through
//! [`EnrichmentFlags`] instead of ad hoc existence checks at the point of use.

use crate::error::{DataError, Result};
use polars::prelude::DataFrame;

/// District identifier column.
pub const DISTRICT_NAME: &str = "district_name";
/// Station identifier column. (district_name, unit_name) is the join key.
pub const UNIT_NAME: &str = "unit_name";
/// First year with recorded incidents.
pub const FIRST_YEAR: &str = "first_year";
/// Last year with recorded incidents.
pub const LAST_YEAR: &str = "last_year";
/// Number of years with records.
pub const YEARS_RECORDED: &str = "years_recorded";
/// Aggregate incident count over the recorded span. Nullable.
pub const TOTAL_INCIDENTS: &str = "total_incidents";
/// Fraction of incidents classified heinous, in [0, 1]. Nullable.
pub const HEINOUS_RATIO: &str = "heinous_ratio";
/// Composite safety score, higher = safer.
pub const SAFETY_INDEX: &str = "safety_index";

/// Risk tier label added by the clustering job.
pub const RISK_TIER: &str = "risk_tier";
/// Next-year forecast added by the trend job.
pub const PREDICTED_NEXT_YEAR: &str = "predicted_next_year_value";
/// Trend direction added by the trend job.
pub const TREND_DIRECTION: &str = "trend_direction";

/// Per-year incident rate derived by the clustering job on its working copy.
pub const INCIDENTS_PER_YEAR: &str = "incidents_per_year";

/// Columns every input table must carry.
pub const REQUIRED_COLUMNS: &[&str] = &[
    DISTRICT_NAME,
    UNIT_NAME,
    FIRST_YEAR,
    LAST_YEAR,
    YEARS_RECORDED,
    TOTAL_INCIDENTS,
    HEINOUS_RATIO,
    SAFETY_INDEX,
];

/// Which optional enrichment columns a loaded table carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentFlags {
    /// Table already has a `risk_tier` column.
    pub has_risk_tier: bool,
    /// Table already has both trend columns.
    pub has_trend: bool,
}

/// Check that every required column is present.
///
/// # Errors
/// Returns [`DataError::MissingColumn`] naming the first absent column.
pub fn validate_required(df: &DataFrame) -> Result<()> {
    for name in REQUIRED_COLUMNS {
        if df.column(name).is_err() {
            return Err(DataError::MissingColumn {
                column: (*name).to_string(),
            });
        }
    }
    Ok(())
}

/// Report which enrichment columns are present.
pub fn enrichment_flags(df: &DataFrame) -> EnrichmentFlags {
    EnrichmentFlags {
        has_risk_tier: df.column(RISK_TIER).is_ok(),
        has_trend: df.column(PREDICTED_NEXT_YEAR).is_ok() && df.column(TREND_DIRECTION).is_ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn base_frame() -> DataFrame {
        df![
            DISTRICT_NAME => ["North"],
            UNIT_NAME => ["Alpha"],
            FIRST_YEAR => [2015i32],
            LAST_YEAR => [2020i32],
            YEARS_RECORDED => [6i32],
            TOTAL_INCIDENTS => [120.0],
            HEINOUS_RATIO => [0.1],
            SAFETY_INDEX => [55.0],
        ]
        .unwrap()
    }

    #[test]
    fn test_validate_required_accepts_base_table() {
        assert!(validate_required(&base_frame()).is_ok());
    }

    #[test]
    fn test_validate_required_names_missing_column() {
        let df = base_frame().drop(HEINOUS_RATIO).unwrap();
        let err = validate_required(&df).unwrap_err();
        assert!(matches!(
            err,
            DataError::MissingColumn { ref column } if column == HEINOUS_RATIO
        ));
    }

    #[test]
    fn test_enrichment_flags_on_base_table() {
        let flags = enrichment_flags(&base_frame());
        assert_eq!(flags, EnrichmentFlags::default());
    }

    #[test]
    fn test_enrichment_flags_detect_risk_tier() {
        let mut df = base_frame();
        df.with_column(Column::new(RISK_TIER.into(), ["HIGH"])).unwrap();
        let flags = enrichment_flags(&df);
        assert!(flags.has_risk_tier);
        assert!(!flags.has_trend);
    }

    #[test]
    fn test_enrichment_flags_require_both_trend_columns() {
        let mut df = base_frame();
        df.with_column(Column::new(PREDICTED_NEXT_YEAR.into(), [12.5]))
            .unwrap();
        assert!(!enrichment_flags(&df).has_trend);
        df.with_column(Column::new(TREND_DIRECTION.into(), ["stable"]))
            .unwrap();
        assert!(enrichment_flags(&df).has_trend);
    }
}
