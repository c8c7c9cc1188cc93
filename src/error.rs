use thiserror::Error;

/// Errors returned by the embedding/reduction/clustering pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Input collection or matrix is empty.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Requested cluster count is incompatible with the dataset.
    #[error("invalid cluster count: requested {requested}, but dataset has {n_items} items")]
    InvalidClusterCount {
        /// Requested number of clusters.
        requested: usize,
        /// Number of items in the dataset.
        n_items: usize,
    },

    /// Rows of a matrix have inconsistent dimensionality.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// A delegated numeric routine failed. The original error is kept as
    /// the source so callers can still inspect the cause.
    #[error("computation failed: {0}")]
    Computation(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    pub(crate) fn computation<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Computation(Box::new(err))
    }
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
