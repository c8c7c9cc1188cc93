//! Dimensionality reduction via principal component analysis.
//!
//! The eigendecomposition is delegated to [`linfa_reduction`]; this module
//! only validates parameters, clamps the requested dimension to what the
//! dataset can support, and converts between row-vector and `ndarray`
//! representations.

use crate::error::{Error, Result};
use crate::matrix;
use linfa::traits::{Fit, Predict};
use linfa::DatasetBase;
use tracing::{debug, info};

/// PCA projection onto the directions of maximal variance.
#[derive(Debug, Clone)]
pub struct Pca {
    /// Requested output dimensionality.
    dim: usize,
}

impl Pca {
    /// Create a projection targeting `dim` output columns.
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    /// Set the target dimensionality.
    pub fn with_dim(mut self, dim: usize) -> Self {
        self.dim = dim;
        self
    }

    /// Project `data` onto its top principal components.
    ///
    /// The effective dimension is `min(dim, n_samples, n_features)`: a
    /// request larger than the dataset supports is clamped (and logged), not
    /// rejected. Output has the same row count as `data`.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] if `data` has no rows.
    /// - [`Error::InvalidParameter`] if `dim == 0`.
    /// - [`Error::DimensionMismatch`] if rows are ragged.
    /// - [`Error::Computation`] if the underlying decomposition fails.
    pub fn transform(&self, data: &[Vec<f32>]) -> Result<Vec<Vec<f32>>> {
        let n_samples = data.len();
        if n_samples == 0 {
            return Err(Error::EmptyInput);
        }
        if self.dim == 0 {
            return Err(Error::InvalidParameter {
                name: "dim",
                message: "must be at least 1",
            });
        }
        let n_features = matrix::rectangular_width(data)?;

        let n_components = self.dim.min(n_samples).min(n_features);
        if n_components < self.dim {
            info!(
                requested = self.dim,
                effective = n_components,
                n_samples,
                n_features,
                "requested dimension exceeds dataset, clamping"
            );
        }

        // linfa's PCA works in f64.
        let records = matrix::to_array2(data, n_features).mapv(f64::from);
        let dataset = DatasetBase::from(records);

        let model = linfa_reduction::Pca::params(n_components)
            .fit(&dataset)
            .map_err(Error::computation)?;
        let reduced = model.predict(&dataset);
        debug!(n_samples, n_components, "PCA projection computed");

        // The truncated SVD yields at most rank(X - mean) columns, which for
        // rank-deficient data is fewer than requested. The remaining
        // components carry no variance; pad them with zeros so the output
        // always has `n_components` columns.
        Ok(reduced
            .outer_iter()
            .map(|row| {
                let mut out: Vec<f32> = row.iter().map(|&v| v as f32).collect();
                out.resize(n_components, 0.0);
                out
            })
            .collect())
    }
}
