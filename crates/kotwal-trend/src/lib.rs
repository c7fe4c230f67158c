#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/kotwal-analytics/kotwal/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod fit;
pub mod series;

// Re-export main types
pub use fit::{TrendConfig, TrendDirection, TrendResult, direction_for, fit_trend};
pub use series::{SeriesConfig, YearlyPoint, synthetic_series};
