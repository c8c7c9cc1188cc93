//! Full pipeline on synthetic solid-color images: embed, reduce, cluster.

use corral::{embed_images, Device, HistogramEmbedder, Kmeans, Pca};
use image::{DynamicImage, Rgb, RgbImage};

fn main() {
    tracing_subscriber::fmt().init();

    // Three color families: reds, blues, greens.
    let colors: Vec<[u8; 3]> = vec![
        [250, 20, 20],
        [230, 40, 30],
        [240, 10, 50],
        [20, 30, 250],
        [40, 20, 230],
        [10, 50, 240],
        [30, 240, 20],
        [50, 230, 40],
        [20, 250, 10],
    ];
    let images: Vec<DynamicImage> = colors
        .iter()
        .map(|c| DynamicImage::ImageRgb8(RgbImage::from_pixel(32, 32, Rgb(*c))))
        .collect();

    let embedder = HistogramEmbedder::default();
    let embeddings = embed_images(&embedder, &images, Device::Cpu).unwrap();
    println!(
        "embedded {} images into {}-dim vectors",
        embeddings.len(),
        embeddings[0].len()
    );

    let reduced = Pca::new(3).transform(&embeddings).unwrap();
    println!("reduced to {} components", reduced[0].len());

    let fit = Kmeans::new(3).with_seed(42).fit(&reduced).unwrap();
    println!("\n=== K-means (k=3) ===");
    for (i, (label, color)) in fit.labels.iter().zip(&colors).enumerate() {
        println!(
            "  image {:2} rgb({:3},{:3},{:3}) => cluster {}",
            i, color[0], color[1], color[2], label
        );
    }
    println!("\ncluster sizes: {:?}", fit.counts);
}
