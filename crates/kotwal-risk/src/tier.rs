//! Risk tier labelling.
//!
//! Clusters are ordered by ascending mean safety index and the resulting
//! rank is mapped positionally onto a tier table: rank 0 (lowest safety)
//! is the most severe tier. The mapping is positional, not semantic, so
//! labelling fails loudly when the partition does not contain exactly one
//! cluster per table entry.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Ordered risk tiers, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    /// Lowest mean safety index
    Critical,

    /// Second-lowest mean safety index
    High,

    /// Second-highest mean safety index
    Medium,

    /// Highest mean safety index
    Low,
}

impl RiskTier {
    /// Returns all tiers, most severe first.
    pub fn all() -> Vec<Self> {
        vec![Self::Critical, Self::High, Self::Medium, Self::Low]
    }

    /// Canonical label used in output tables.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }

    /// Parse a tier from its canonical label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "CRITICAL" => Some(Self::Critical),
            "HIGH" => Some(Self::High),
            "MEDIUM" => Some(Self::Medium),
            "LOW" => Some(Self::Low),
            _ => None,
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tier per ascending-safety rank: rank 0 is CRITICAL, rank 3 is LOW.
pub const DEFAULT_TIER_TABLE: [RiskTier; 4] = [
    RiskTier::Critical,
    RiskTier::High,
    RiskTier::Medium,
    RiskTier::Low,
];

/// Errors that can occur during tier labelling.
#[derive(Debug, Error)]
pub enum TierError {
    /// Produced cluster count differs from the tier table length
    #[error("Cluster count mismatch: expected {expected} clusters, found {actual}")]
    ClusterCountMismatch {
        /// Tier table length
        expected: usize,
        /// Distinct clusters present in the assignments
        actual: usize,
    },
}

/// Label each station by its cluster's ascending-safety rank.
///
/// `safety` holds the observed (pre-imputation) safety index per station;
/// missing values are excluded from the cluster means. Ties on the mean
/// break by ascending raw cluster id; a cluster whose members carry no
/// observed safety value orders after all measurable clusters.
///
/// # Errors
/// [`TierError::ClusterCountMismatch`] unless the assignments contain
/// exactly `tiers.len()` distinct cluster ids, all within `0..tiers.len()`.
pub fn assign_tiers(
    assignments: &[usize],
    safety: &[Option<f64>],
    tiers: &[RiskTier],
) -> Result<Vec<RiskTier>, TierError> {
    let k = tiers.len();

    let mut counts = vec![0usize; k];
    for &a in assignments {
        if a >= k {
            return Err(TierError::ClusterCountMismatch {
                expected: k,
                actual: a + 1,
            });
        }
        counts[a] += 1;
    }
    let distinct = counts.iter().filter(|&&c| c > 0).count();
    if distinct != k {
        return Err(TierError::ClusterCountMismatch {
            expected: k,
            actual: distinct,
        });
    }

    let means = cluster_means(assignments, safety, k);
    let mut order: Vec<usize> = (0..k).collect();
    order.sort_by(|a, b| means[*a].total_cmp(&means[*b]).then(a.cmp(b)));

    let mut rank_of = vec![0usize; k];
    for (rank, cluster) in order.into_iter().enumerate() {
        rank_of[cluster] = rank;
    }

    Ok(assignments.iter().map(|&a| tiers[rank_of[a]]).collect())
}

/// Mean observed safety per cluster; NaN when a cluster has no observed
/// values, which orders last under `total_cmp`.
fn cluster_means(assignments: &[usize], safety: &[Option<f64>], k: usize) -> Vec<f64> {
    let mut sums = vec![0.0f64; k];
    let mut counts = vec![0usize; k];
    for (&a, value) in assignments.iter().zip(safety.iter()) {
        if let Some(v) = value
            && v.is_finite()
        {
            sums[a] += v;
            counts[a] += 1;
        }
    }
    (0..k)
        .map(|c| {
            if counts[c] > 0 {
                sums[c] / counts[c] as f64
            } else {
                f64::NAN
            }
        })
        .collect()
}
