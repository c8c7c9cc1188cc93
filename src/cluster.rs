//! Centroid-based partitioning of reduced embeddings.
//!
//! Lloyd iterations and k-means++ seeding are delegated to
//! [`linfa_clustering::KMeans`]. This module validates arguments up front,
//! wraps any failure inside the routine as [`Error::Computation`] with the
//! cause attached, and reports per-cluster member counts alongside the
//! labels.

use crate::error::{Error, Result};
use crate::matrix;
use linfa::traits::{Fit, Predict};
use linfa::DatasetBase;
use linfa_clustering::KMeans as LinfaKmeans;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

/// Common interface for hard clustering algorithms (one label per point).
pub trait Clustering {
    /// Fit the model (if needed) and return one cluster label per input point.
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>>;

    /// The configured number of clusters.
    fn n_clusters(&self) -> usize;
}

/// K-means clustering.
#[derive(Debug, Clone)]
pub struct Kmeans {
    /// Number of clusters.
    k: usize,
    /// Optional RNG seed for reproducible seeding.
    seed: Option<u64>,
    /// Maximum Lloyd iterations.
    max_iter: u64,
}

/// Result of a k-means fit.
#[derive(Debug, Clone)]
pub struct KmeansFit {
    /// Cluster centers, `k` rows.
    pub centroids: Vec<Vec<f32>>,
    /// One label per input row, each in `[0, k)`.
    pub labels: Vec<usize>,
    /// Member count per cluster; `counts[c]` is the size of cluster `c`.
    pub counts: Vec<usize>,
}

impl Kmeans {
    /// Create a k-means model with `k` clusters.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            seed: None,
            max_iter: 300,
        }
    }

    /// Set the RNG seed for reproducible centroid seeding.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the maximum number of Lloyd iterations.
    pub fn with_max_iter(mut self, max_iter: u64) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Partition `data` into `k` clusters.
    ///
    /// # Errors
    ///
    /// Validated before any computation:
    ///
    /// - [`Error::EmptyInput`] if `data` has no rows.
    /// - [`Error::InvalidParameter`] if `k == 0`.
    /// - [`Error::InvalidClusterCount`] if `k` exceeds the number of rows.
    /// - [`Error::DimensionMismatch`] if rows are ragged.
    ///
    /// Any failure inside the clustering routine itself surfaces as
    /// [`Error::Computation`] with the original error as the source.
    pub fn fit(&self, data: &[Vec<f32>]) -> Result<KmeansFit> {
        let n_samples = data.len();
        if n_samples == 0 {
            return Err(Error::EmptyInput);
        }
        if self.k == 0 {
            return Err(Error::InvalidParameter {
                name: "k",
                message: "must be at least 1",
            });
        }
        if self.k > n_samples {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: n_samples,
            });
        }
        let width = matrix::rectangular_width(data)?;

        let records = matrix::to_array2(data, width);
        let dataset = DatasetBase::from(records);

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let model = LinfaKmeans::params_with_rng(self.k, rng)
            .max_n_iterations(self.max_iter)
            .fit(&dataset)
            .map_err(Error::computation)?;

        let labels = model.predict(&dataset);
        let mut counts = vec![0usize; self.k];
        for &label in labels.iter() {
            counts[label] += 1;
        }

        let centroids: Vec<Vec<f32>> = model
            .centroids()
            .outer_iter()
            .map(|row| row.to_vec())
            .collect();

        info!(k = self.k, n_samples, "k-means fit complete");

        Ok(KmeansFit {
            centroids,
            labels: labels.iter().copied().collect(),
            counts,
        })
    }
}

impl Clustering for Kmeans {
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>> {
        self.fit(data).map(|fit| fit.labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_blobs() -> Vec<Vec<f32>> {
        vec![
            vec![0.0, 0.0],
            vec![0.1, 0.0],
            vec![0.0, 0.1],
            vec![5.0, 5.0],
            vec![5.1, 5.0],
            vec![5.0, 5.1],
        ]
    }

    #[test]
    fn test_kmeans_two_clusters() {
        let data = two_blobs();
        let fit = Kmeans::new(2).with_seed(42).fit(&data).unwrap();

        assert_eq!(fit.labels.len(), 6);
        assert_eq!(fit.centroids.len(), 2);
        assert_eq!(fit.counts.len(), 2);
        assert_eq!(fit.counts.iter().sum::<usize>(), 6);

        // First three together, last three together, groups distinct.
        assert_eq!(fit.labels[0], fit.labels[1]);
        assert_eq!(fit.labels[1], fit.labels[2]);
        assert_eq!(fit.labels[3], fit.labels[4]);
        assert_eq!(fit.labels[4], fit.labels[5]);
        assert_ne!(fit.labels[0], fit.labels[3]);
    }

    #[test]
    fn test_counts_match_labels() {
        let data = two_blobs();
        let fit = Kmeans::new(2).with_seed(7).fit(&data).unwrap();

        for c in 0..2 {
            let observed = fit.labels.iter().filter(|&&l| l == c).count();
            assert_eq!(fit.counts[c], observed);
        }
    }

    #[test]
    fn test_centroid_dimensionality() {
        let data = two_blobs();
        let fit = Kmeans::new(2).with_seed(1).fit(&data).unwrap();
        for centroid in &fit.centroids {
            assert_eq!(centroid.len(), 2);
        }
    }

    #[test]
    fn test_too_many_clusters_rejected() {
        let data = vec![vec![0.0, 0.0], vec![1.0, 1.0]];
        let result = Kmeans::new(3).fit(&data);
        assert!(matches!(
            result,
            Err(Error::InvalidClusterCount {
                requested: 3,
                n_items: 2
            })
        ));
    }

    #[test]
    fn test_empty_input_rejected() {
        let data: Vec<Vec<f32>> = vec![];
        assert!(matches!(Kmeans::new(1).fit(&data), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_zero_k_rejected() {
        let data = vec![vec![0.0, 0.0]];
        assert!(matches!(
            Kmeans::new(0).fit(&data),
            Err(Error::InvalidParameter { name: "k", .. })
        ));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let data = vec![vec![0.0, 0.0], vec![1.0]];
        assert!(matches!(
            Kmeans::new(1).fit(&data),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_fit_predict_matches_fit() {
        let data = two_blobs();
        let model = Kmeans::new(2).with_seed(42);
        let fit = model.fit(&data).unwrap();
        let labels = model.fit_predict(&data).unwrap();
        assert_eq!(labels, fit.labels);
        assert_eq!(model.n_clusters(), 2);
    }
}
