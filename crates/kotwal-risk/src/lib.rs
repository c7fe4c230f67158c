#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/kotwal-analytics/kotwal/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod features;
pub mod kmeans;
pub mod tier;

// Re-export main types
pub use features::{FeatureError, feature_matrix};
pub use kmeans::{ClusterError, KMeans, KMeansConfig, KMeansFit};
pub use tier::{DEFAULT_TIER_TABLE, RiskTier, TierError, assign_tiers};
