//! Embedding extraction: images in, one fixed-length vector per image out.
//!
//! The actual feature extractor is an external collaborator behind the
//! [`ImageEmbedder`] trait. [`embed_images`] only orchestrates: it walks the
//! collection in order, stacks the vectors into a row-per-image matrix, and
//! checks that every row has the dimensionality the embedder advertises.
//! Failures inside the extractor propagate unmodified.
//!
//! [`HistogramEmbedder`] is a small built-in CPU extractor (downsample +
//! per-channel color histogram) so the pipeline runs end-to-end without an
//! external model runtime. Heavier extractors (e.g. an ONNX CLIP vision
//! encoder) plug in through the same trait.

use crate::error::{Error, Result};
use image::imageops::FilterType;
use image::DynamicImage;
use std::fmt;
use tracing::info;

/// Compute device preference for embedding extraction.
///
/// This is a preference, not a guarantee: an embedder that only supports the
/// CPU may ignore a [`Device::Gpu`] request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Device {
    /// Run on the CPU.
    #[default]
    Cpu,
    /// Run on a hardware accelerator, if the embedder supports one.
    Gpu,
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => f.write_str("CPU"),
            Device::Gpu => f.write_str("GPU"),
        }
    }
}

/// An external feature extractor producing one fixed-length vector per image.
pub trait ImageEmbedder {
    /// Opaque input unit. Whatever the extractor accepts: a decoded image,
    /// a pixel buffer, a file handle.
    type Image;

    /// Length of the vectors this embedder produces.
    fn dimension(&self) -> usize;

    /// Embed a single image on the preferred device.
    fn embed(&self, image: &Self::Image, device: Device) -> Result<Vec<f32>>;
}

/// Embed a collection of images, preserving input order.
///
/// Returns one row per image; row `i` is the embedding of `images[i]`.
///
/// # Errors
///
/// - [`Error::EmptyInput`] if `images` is empty.
/// - [`Error::DimensionMismatch`] if the embedder returns a vector whose
///   length differs from [`ImageEmbedder::dimension`].
/// - Any error from the embedder itself, unmodified.
pub fn embed_images<E: ImageEmbedder>(
    embedder: &E,
    images: &[E::Image],
    device: Device,
) -> Result<Vec<Vec<f32>>> {
    if images.is_empty() {
        return Err(Error::EmptyInput);
    }

    info!(%device, n_images = images.len(), "embedding images");

    let dim = embedder.dimension();
    let mut embeddings = Vec::with_capacity(images.len());
    for image in images {
        let vector = embedder.embed(image, device)?;
        if vector.len() != dim {
            return Err(Error::DimensionMismatch {
                expected: dim,
                found: vector.len(),
            });
        }
        embeddings.push(vector);
    }

    Ok(embeddings)
}

/// Built-in CPU embedder: downsampled per-channel color histogram.
///
/// Not a semantic embedding, but cheap, deterministic, and good enough to
/// group images by overall palette. Vectors are L2-normalized.
#[derive(Debug, Clone)]
pub struct HistogramEmbedder {
    bins: usize,
}

/// Downsample target edge length before histogramming.
const SAMPLE_SIZE: u32 = 64;

impl HistogramEmbedder {
    /// Create an embedder with `bins` histogram buckets per color channel.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] unless `bins` is in `1..=256`.
    pub fn new(bins: usize) -> Result<Self> {
        if bins == 0 || bins > 256 {
            return Err(Error::InvalidParameter {
                name: "bins",
                message: "must be in 1..=256",
            });
        }
        Ok(Self { bins })
    }
}

impl Default for HistogramEmbedder {
    fn default() -> Self {
        Self { bins: 16 }
    }
}

impl ImageEmbedder for HistogramEmbedder {
    type Image = DynamicImage;

    fn dimension(&self) -> usize {
        self.bins * 3
    }

    fn embed(&self, image: &DynamicImage, _device: Device) -> Result<Vec<f32>> {
        let rgb = image::imageops::resize(
            &image.to_rgb8(),
            SAMPLE_SIZE,
            SAMPLE_SIZE,
            FilterType::Triangle,
        );

        let bins = self.bins;
        let mut hist = vec![0f32; bins * 3];
        for pixel in rgb.pixels() {
            let r = (pixel[0] as usize * bins) / 256;
            let g = (pixel[1] as usize * bins) / 256;
            let b = (pixel[2] as usize * bins) / 256;
            hist[r] += 1.0;
            hist[bins + g] += 1.0;
            hist[2 * bins + b] += 1.0;
        }

        // L2-normalize so image size never dominates distance.
        let norm = hist.iter().map(|v| v * v).sum::<f32>().sqrt().max(1e-6);
        for v in &mut hist {
            *v /= norm;
        }

        Ok(hist)
    }
}
