//! Synthetic yearly incident series.
//!
//! Spreads a station's aggregate incident count across its recorded year
//! span: a flat per-year average plus a linear ramp from `-heinous_ratio`
//! to `+heinous_ratio`, scaled by `avg * ramp_scale` and floored at zero.
//! The ramp manufactures plausible year-to-year variation so a trend line
//! is fittable at all; it is an approximation, not a measurement, and
//! stands in only until real per-year counts exist.

use kotwal_data::StationRecord;
use serde::{Deserialize, Serialize};

/// One synthetic observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearlyPoint {
    /// Calendar year.
    pub year: i32,
    /// Synthetic incident count, never negative.
    pub count: f64,
}

/// Configuration for series synthesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesConfig {
    /// Fraction of the yearly average the ramp may swing by (default: 0.2)
    pub ramp_scale: f64,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self { ramp_scale: 0.2 }
    }
}

/// Build the synthetic series for one station, one point per integer year
/// in `[first_year, last_year]`.
///
/// Pure function of the record: re-invoking it restarts the sequence.
/// Returns an empty series when `years_recorded <= 0`, the total is
/// missing or NaN, or the year span is inverted; such stations are
/// excluded from trend fitting rather than errored. A missing or NaN
/// heinous ratio flattens the ramp to zero.
pub fn synthetic_series(record: &StationRecord, config: &SeriesConfig) -> Vec<YearlyPoint> {
    let Some(total) = record.total_incidents.filter(|v| v.is_finite()) else {
        return Vec::new();
    };
    if record.years_recorded <= 0 || record.first_year > record.last_year {
        return Vec::new();
    }

    let avg = total / f64::from(record.years_recorded);
    let heinous = record
        .heinous_ratio
        .filter(|v| v.is_finite())
        .unwrap_or(0.0);
    let len = (record.last_year - record.first_year + 1) as usize;

    (0..len)
        .map(|i| {
            let ramp = spaced(-heinous, heinous, len, i) * avg * config.ramp_scale;
            YearlyPoint {
                year: record.first_year + i as i32,
                count: (avg + ramp).max(0.0),
            }
        })
        .collect()
}

/// The i-th of `len` evenly spaced values from `start` to `end` inclusive.
/// A single-element span takes `start`.
fn spaced(start: f64, end: f64, len: usize, i: usize) -> f64 {
    if len < 2 {
        return start;
    }
    start + (end - start) * (i as f64 / (len - 1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn record(total: Option<f64>, years: i32, ratio: Option<f64>) -> StationRecord {
        StationRecord {
            district_name: "North".to_string(),
            unit_name: "Alpha".to_string(),
            first_year: 2016,
            last_year: 2020,
            years_recorded: years,
            total_incidents: total,
            heinous_ratio: ratio,
            safety_index: Some(50.0),
        }
    }

    #[test]
    fn test_covers_every_year_inclusive() {
        let series = synthetic_series(&record(Some(100.0), 5, Some(0.5)), &SeriesConfig::default());
        let years: Vec<i32> = series.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2016, 2017, 2018, 2019, 2020]);
    }

    #[test]
    fn test_ramp_spans_plus_minus_ratio() {
        let series = synthetic_series(&record(Some(100.0), 5, Some(0.5)), &SeriesConfig::default());
        // avg = 20; ramp endpoints = ±0.5 * 20 * 0.2 = ±2.
        assert_relative_eq!(series[0].count, 18.0);
        assert_relative_eq!(series[2].count, 20.0);
        assert_relative_eq!(series[4].count, 22.0);
    }

    #[test]
    fn test_counts_never_negative() {
        let series = synthetic_series(&record(Some(2.0), 5, Some(1.0)), &SeriesConfig::default());
        assert!(!series.is_empty());
        assert!(series.iter().all(|p| p.count >= 0.0));
    }

    #[test]
    fn test_zero_years_recorded_yields_empty() {
        assert!(synthetic_series(&record(Some(100.0), 0, Some(0.5)), &SeriesConfig::default())
            .is_empty());
    }

    #[test]
    fn test_missing_total_yields_empty() {
        assert!(synthetic_series(&record(None, 5, Some(0.5)), &SeriesConfig::default()).is_empty());
        assert!(
            synthetic_series(&record(Some(f64::NAN), 5, Some(0.5)), &SeriesConfig::default())
                .is_empty()
        );
    }

    #[test]
    fn test_inverted_year_span_yields_empty() {
        let mut rec = record(Some(100.0), 5, Some(0.5));
        rec.first_year = 2021;
        assert!(synthetic_series(&rec, &SeriesConfig::default()).is_empty());
    }

    #[test]
    fn test_missing_ratio_gives_flat_series() {
        let series = synthetic_series(&record(Some(100.0), 5, None), &SeriesConfig::default());
        assert!(series.iter().all(|p| p.count == 20.0));
    }

    #[test]
    fn test_single_year_takes_ramp_start() {
        let mut rec = record(Some(30.0), 1, Some(0.5));
        rec.first_year = 2020;
        rec.last_year = 2020;
        let series = synthetic_series(&rec, &SeriesConfig::default());
        assert_eq!(series.len(), 1);
        // avg = 30; ramp start = -0.5 * 30 * 0.2 = -3.
        assert_relative_eq!(series[0].count, 27.0);
    }
}
