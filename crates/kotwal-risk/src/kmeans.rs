//! Seeded k-means clustering.
//!
//! Lloyd's algorithm with k-means++ initialization driven by a fixed RNG
//! seed: the same input and seed always reproduce the same partition.
//! Nearest-centroid ties resolve to the lowest centroid index, and a
//! cluster emptied during iteration is re-seeded with the point farthest
//! from its current centroid, so no step depends on iteration order or
//! unseeded randomness.

use ndarray::{Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during clustering.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// Zero stations, or more clusters requested than stations
    #[error("Empty feature set: {stations} stations for k = {k}")]
    EmptyFeatureSet {
        /// Number of rows in the feature matrix
        stations: usize,
        /// Requested cluster count
        k: usize,
    },

    /// Cluster count must be at least 1
    #[error("Invalid cluster count: {0}")]
    InvalidK(usize),
}

/// K-means configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KMeansConfig {
    /// Number of clusters (default: 4)
    pub k: usize,

    /// RNG seed for centroid initialization (default: 42)
    pub seed: u64,

    /// Maximum Lloyd iterations (default: 300)
    pub max_iter: usize,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 4,
            seed: 42,
            max_iter: 300,
        }
    }
}

/// Result of a k-means run.
#[derive(Debug, Clone)]
pub struct KMeansFit {
    /// Cluster id per input row, each in `0..k`.
    pub assignments: Vec<usize>,
    /// Final centroids, one row per cluster.
    pub centroids: Array2<f64>,
}

/// Seeded k-means estimator.
#[derive(Debug, Default)]
pub struct KMeans {
    config: KMeansConfig,
}

impl KMeans {
    /// Create a new estimator with the given configuration.
    pub const fn new(config: KMeansConfig) -> Self {
        Self { config }
    }

    /// Partition the rows of `data` into `k` clusters.
    ///
    /// # Errors
    /// [`ClusterError::InvalidK`] for k = 0, [`ClusterError::EmptyFeatureSet`]
    /// when the matrix has no rows or fewer rows than clusters.
    pub fn fit(&self, data: &Array2<f64>) -> Result<KMeansFit, ClusterError> {
        let n = data.nrows();
        let k = self.config.k;

        if k == 0 {
            return Err(ClusterError::InvalidK(k));
        }
        if n == 0 || k > n {
            return Err(ClusterError::EmptyFeatureSet { stations: n, k });
        }

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut centroids = init_centroids(data, k, &mut rng);
        let mut assignments = vec![0usize; n];
        let mut previous = vec![usize::MAX; n];

        for _ in 0..self.config.max_iter {
            assign_points(data, &centroids, &mut assignments);
            reseed_empty_clusters(data, &centroids, &mut assignments, k);
            if assignments == previous {
                break;
            }
            previous.copy_from_slice(&assignments);
            update_centroids(data, &assignments, &mut centroids, k);
        }

        Ok(KMeansFit {
            assignments,
            centroids,
        })
    }
}

/// Squared Euclidean distance between two points.
fn sq_dist(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum()
}

/// K-means++ initialization: the first centroid is drawn uniformly, each
/// further centroid with probability proportional to squared distance from
/// the nearest already-chosen centroid.
fn init_centroids(data: &Array2<f64>, k: usize, rng: &mut StdRng) -> Array2<f64> {
    let n = data.nrows();
    let mut centroids = Array2::<f64>::zeros((k, data.ncols()));

    let first = rng.gen_range(0..n);
    centroids.row_mut(0).assign(&data.row(first));

    let mut nearest = vec![f64::INFINITY; n];
    for c in 1..k {
        for i in 0..n {
            let d = sq_dist(data.row(i), centroids.row(c - 1));
            if d < nearest[i] {
                nearest[i] = d;
            }
        }

        let total: f64 = nearest.iter().sum();
        let chosen = if total > 0.0 {
            weighted_pick(&nearest, rng.r#gen::<f64>() * total)
        } else {
            // All points coincide with a chosen centroid; any pick is as
            // good as another.
            rng.gen_range(0..n)
        };
        centroids.row_mut(c).assign(&data.row(chosen));
    }

    centroids
}

/// Index selected by walking the cumulative weights until `target` is
/// exhausted. Zero-weight entries (points already chosen) are skipped.
fn weighted_pick(weights: &[f64], mut target: f64) -> usize {
    let mut last_positive = 0;
    for (i, w) in weights.iter().enumerate() {
        if *w <= 0.0 {
            continue;
        }
        last_positive = i;
        target -= w;
        if target <= 0.0 {
            return i;
        }
    }
    // Floating-point underrun: fall back to the last weighted candidate.
    last_positive
}

/// Assign each point to its nearest centroid, lowest index on ties.
fn assign_points(data: &Array2<f64>, centroids: &Array2<f64>, assignments: &mut [usize]) {
    for i in 0..data.nrows() {
        let mut best = 0;
        let mut best_d = f64::INFINITY;
        for c in 0..centroids.nrows() {
            let d = sq_dist(data.row(i), centroids.row(c));
            if d < best_d {
                best_d = d;
                best = c;
            }
        }
        assignments[i] = best;
    }
}

/// Give every empty cluster the point farthest from its assigned centroid,
/// never stealing from a singleton cluster. Terminates because the matrix
/// has at least k rows.
fn reseed_empty_clusters(
    data: &Array2<f64>,
    centroids: &Array2<f64>,
    assignments: &mut [usize],
    k: usize,
) {
    loop {
        let mut counts = vec![0usize; k];
        for &a in assignments.iter() {
            counts[a] += 1;
        }
        let Some(empty) = counts.iter().position(|&c| c == 0) else {
            break;
        };

        let mut far_idx = 0;
        let mut far_d = -1.0;
        for i in 0..data.nrows() {
            if counts[assignments[i]] <= 1 {
                continue;
            }
            let d = sq_dist(data.row(i), centroids.row(assignments[i]));
            if d > far_d {
                far_d = d;
                far_idx = i;
            }
        }
        assignments[far_idx] = empty;
    }
}

/// Recompute each centroid as the mean of its members.
fn update_centroids(
    data: &Array2<f64>,
    assignments: &[usize],
    centroids: &mut Array2<f64>,
    k: usize,
) {
    let mut counts = vec![0usize; k];
    centroids.fill(0.0);
    for (i, &a) in assignments.iter().enumerate() {
        counts[a] += 1;
        let mut row = centroids.row_mut(a);
        row += &data.row(i);
    }
    for c in 0..k {
        if counts[c] > 0 {
            let mut row = centroids.row_mut(c);
            row /= counts[c] as f64;
        }
    }
}
