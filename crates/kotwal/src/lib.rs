#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/kotwal-analytics/kotwal/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod pipeline;

// Re-export main types from sub-crates
pub use kotwal_data as data;
pub use kotwal_output as output;
pub use kotwal_risk as risk;
pub use kotwal_trend as trend;

// Re-export the job surface
pub use pipeline::{
    ClusterJobConfig, PipelineError, TrendJobConfig, run_cluster_job, run_trend_job,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
