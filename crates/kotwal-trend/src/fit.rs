//! Least-squares trend fitting.
//!
//! Fits an ordinary least-squares line through a station's synthetic
//! yearly series (year independent, count dependent) and classifies the
//! slope against a fixed threshold. The fit is total: degenerate input
//! degrades to a flat result instead of erroring, so every station yields
//! exactly one [`TrendResult`].

use crate::series::YearlyPoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a fitted trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// Slope above the threshold
    Increasing,

    /// Slope below the negated threshold
    Decreasing,

    /// Slope within the threshold band
    Stable,
}

impl TrendDirection {
    /// Canonical label used in output tables.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Configuration for trend classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendConfig {
    /// Slope magnitude beyond which a trend counts as moving (default: 0.5).
    /// A policy constant, not derived from data.
    pub slope_threshold: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            slope_threshold: 0.5,
        }
    }
}

/// Fitted trend for one station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendResult {
    /// OLS slope in incidents per year.
    pub slope: f64,
    /// Predicted count for the year after the last observation.
    pub predicted: f64,
    /// Classified direction.
    pub direction: TrendDirection,
}

/// Fit a line through the series and predict the year after `max(year)`.
///
/// An empty series returns `(0, 0, stable)` without fitting; a single
/// point has slope 0 and predicts its own count.
pub fn fit_trend(series: &[YearlyPoint], config: &TrendConfig) -> TrendResult {
    if series.is_empty() {
        return TrendResult {
            slope: 0.0,
            predicted: 0.0,
            direction: TrendDirection::Stable,
        };
    }

    let n = series.len() as f64;
    let mean_x = series.iter().map(|p| f64::from(p.year)).sum::<f64>() / n;
    let mean_y = series.iter().map(|p| p.count).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for p in series {
        let dx = f64::from(p.year) - mean_x;
        sxx += dx * dx;
        sxy += dx * (p.count - mean_y);
    }

    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
    let intercept = mean_y - slope * mean_x;

    let next_year = series.iter().map(|p| p.year).max().unwrap_or(0) + 1;
    let predicted = slope * f64::from(next_year) + intercept;

    TrendResult {
        slope,
        predicted,
        direction: direction_for(slope, config.slope_threshold),
    }
}

/// Classify a slope against the threshold. Exactly `±threshold` is stable.
pub fn direction_for(slope: f64, threshold: f64) -> TrendDirection {
    if slope > threshold {
        TrendDirection::Increasing
    } else if slope < -threshold {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    }
}
