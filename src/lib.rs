//! Embed, reduce, and cluster image collections.
//!
//! `corral` is a small pipeline for organizing images: extract one embedding
//! vector per image, project the embeddings onto their top principal
//! components, and partition the result with k-means. The three stages are
//! independent, stateless functions; data flows strictly forward:
//!
//! ```text
//! images -> embeddings -> reduced embeddings -> (centroids, labels, counts)
//! ```
//!
//! The numeric heavy lifting is delegated: PCA to [`linfa_reduction`] and
//! k-means to [`linfa_clustering`]. The feature extractor is a pluggable
//! collaborator behind [`embed::ImageEmbedder`]; a histogram-based CPU
//! embedder ships in the crate for model-free use.
//!
//! This crate emits [`tracing`] events but never installs a subscriber;
//! logging setup belongs to the calling application.
//!
//! ```rust
//! use corral::{embed_images, Device, HistogramEmbedder, Kmeans, Pca};
//! use image::{DynamicImage, Rgb, RgbImage};
//!
//! let images: Vec<DynamicImage> = [[250u8, 10, 10], [240, 20, 5], [10, 10, 250], [5, 25, 240]]
//!     .iter()
//!     .map(|c| DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb(*c))))
//!     .collect();
//!
//! let embeddings = embed_images(&HistogramEmbedder::default(), &images, Device::Cpu).unwrap();
//! let reduced = Pca::new(2).transform(&embeddings).unwrap();
//! let fit = Kmeans::new(2).with_seed(42).fit(&reduced).unwrap();
//!
//! assert_eq!(fit.labels.len(), 4);
//! assert_eq!(fit.counts.iter().sum::<usize>(), 4);
//! ```

#![forbid(unsafe_code)]

pub mod cluster;
pub mod embed;
pub mod error;
pub mod reduce;

mod matrix;

pub use cluster::{Clustering, Kmeans, KmeansFit};
pub use embed::{embed_images, Device, HistogramEmbedder, ImageEmbedder};
pub use error::{Error, Result};
pub use reduce::Pca;
