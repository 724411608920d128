//! Ambient color extraction.
//!
//! Picks one representative color from the original photo:
//!
//! 1. Shrink the photo so its longest side is at most `sample_edge` pixels
//! 2. Drop near-black and near-white samples (shadows and highlights)
//! 3. Cluster the rest with seeded k-means
//! 4. Walk the clusters from most to least populated and take the first
//!    mid-tone centroid; fall back to the most populated cluster
//!
//! An image with no usable samples yields [`NEUTRAL_GRAY`].

mod kmeans;

pub use kmeans::{Cluster, KMeans};

use image::{Rgb, RgbImage, imageops};

use crate::config::AmbientConfig;
use crate::debug;

/// Returned when every sample is rejected as shadow or highlight.
pub const NEUTRAL_GRAY: Rgb<u8> = Rgb([128, 128, 128]);

/// Samples with a channel sum at or below this are shadows.
const SAMPLE_MIN_SUM: u32 = 30;
/// Samples with a channel sum at or above this are highlights.
const SAMPLE_MAX_SUM: u32 = 700;
/// Centroids must have a channel sum strictly above this to be picked.
const MID_TONE_MIN_SUM: f64 = 40.0;
/// Centroids must have a channel sum strictly below this to be picked.
const MID_TONE_MAX_SUM: f64 = 650.0;

/// Extract the ambient color of `img`.
pub fn extract_ambient_color(img: &RgbImage, config: &AmbientConfig) -> Rgb<u8> {
    let samples = collect_samples(img, config.sample_edge);
    if samples.is_empty() {
        debug!("ambient"; "no usable samples, using neutral gray");
        return NEUTRAL_GRAY;
    }

    let clusters = rank_clusters(config.kmeans().fit(&samples));

    crate::debug_do! {
        debug!("ambient"; "{} samples in {} clusters", samples.len(), clusters.len());
        for cluster in &clusters {
            debug!("ambient"; "  {:>6} x {:?}", cluster.members, cluster.rounded());
        }
    }

    pick_cluster(&clusters)
}

/// Downsample `img` and keep the samples that are neither shadow nor highlight.
pub fn collect_samples(img: &RgbImage, sample_edge: u32) -> Vec<[u8; 3]> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let (sample_width, sample_height) = thumbnail_dimensions(width, height, sample_edge);
    let thumb;
    let source = if (sample_width, sample_height) == (width, height) {
        img
    } else {
        thumb = imageops::thumbnail(img, sample_width, sample_height);
        &thumb
    };

    source
        .pixels()
        .filter(|px| {
            let sum = crate::image::channel_sum(px);
            sum > SAMPLE_MIN_SUM && sum < SAMPLE_MAX_SUM
        })
        .map(|px| px.0)
        .collect()
}

/// Dimensions that fit `width x height` into `edge` on the longest side.
///
/// Images already within bounds keep their size.
pub fn thumbnail_dimensions(width: u32, height: u32, edge: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= edge {
        return (width, height);
    }

    let scale = f64::from(edge) / f64::from(longest);
    let fit = |side: u32| ((f64::from(side) * scale).round() as u32).clamp(1, edge);
    if width >= height {
        (edge, fit(height))
    } else {
        (fit(width), edge)
    }
}

/// Sort clusters by descending population.
///
/// The sort is stable: equally populated clusters keep their index order.
pub fn rank_clusters(mut clusters: Vec<Cluster>) -> Vec<Cluster> {
    clusters.sort_by(|a, b| b.members.cmp(&a.members));
    clusters
}

/// First populated mid-tone cluster in rank order, else the top-ranked one.
pub fn pick_cluster(ranked: &[Cluster]) -> Rgb<u8> {
    ranked
        .iter()
        .filter(|c| c.members > 0)
        .find(|c| {
            let sum = c.channel_sum();
            sum > MID_TONE_MIN_SUM && sum < MID_TONE_MAX_SUM
        })
        .or_else(|| ranked.first())
        .map(|c| Rgb(c.rounded()))
        .unwrap_or(NEUTRAL_GRAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster(centroid: [f64; 3], members: usize) -> Cluster {
        Cluster { centroid, members }
    }

    fn uniform(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(color))
    }

    #[test]
    fn test_uniform_mid_tone_is_returned_exactly() {
        let config = AmbientConfig::default();
        for color in [[200, 30, 30], [17, 60, 5], [120, 180, 240]] {
            let img = uniform(64, 48, color);
            assert_eq!(extract_ambient_color(&img, &config), Rgb(color));
        }
    }

    #[test]
    fn test_uniform_large_image_survives_downsampling() {
        let img = uniform(640, 360, [60, 120, 90]);
        let color = extract_ambient_color(&img, &AmbientConfig::default());
        assert_eq!(color, Rgb([60, 120, 90]));
    }

    #[test]
    fn test_black_and_white_fall_back_to_gray() {
        let config = AmbientConfig::default();
        assert_eq!(
            extract_ambient_color(&uniform(32, 32, [0, 0, 0]), &config),
            NEUTRAL_GRAY
        );
        assert_eq!(
            extract_ambient_color(&uniform(32, 32, [255, 255, 255]), &config),
            NEUTRAL_GRAY
        );
    }

    #[test]
    fn test_empty_image_falls_back_to_gray() {
        let img = RgbImage::new(0, 0);
        assert_eq!(
            extract_ambient_color(&img, &AmbientConfig::default()),
            NEUTRAL_GRAY
        );
    }

    #[test]
    fn test_sample_filter_bounds_are_exclusive() {
        let mut img = RgbImage::new(4, 1);
        img.put_pixel(0, 0, Rgb([10, 10, 10])); // sum 30: shadow
        img.put_pixel(1, 0, Rgb([10, 10, 11])); // sum 31: kept
        img.put_pixel(2, 0, Rgb([233, 233, 233])); // sum 699: kept
        img.put_pixel(3, 0, Rgb([234, 233, 233])); // sum 700: highlight

        let samples = collect_samples(&img, 100);
        assert_eq!(samples, vec![[10, 10, 11], [233, 233, 233]]);
    }

    #[test]
    fn test_thumbnail_dimensions() {
        assert_eq!(thumbnail_dimensions(80, 60, 100), (80, 60));
        assert_eq!(thumbnail_dimensions(1000, 600, 100), (100, 60));
        assert_eq!(thumbnail_dimensions(600, 1000, 100), (60, 100));
        assert_eq!(thumbnail_dimensions(5000, 10, 100), (100, 1));
        assert_eq!(thumbnail_dimensions(300, 300, 100), (100, 100));
    }

    #[test]
    fn test_rank_is_stable_for_equal_counts() {
        let ranked = rank_clusters(vec![
            cluster([1.0, 1.0, 1.0], 5),
            cluster([2.0, 2.0, 2.0], 9),
            cluster([3.0, 3.0, 3.0], 5),
        ]);
        let order: Vec<_> = ranked.iter().map(|c| c.centroid[0]).collect();
        assert_eq!(order, vec![2.0, 1.0, 3.0]);
    }

    #[test]
    fn test_pick_takes_first_mid_tone_in_rank_order() {
        // The second cluster sits closer to mid-gray than the first, but
        // rank order alone decides.
        let ranked = [
            cluster([240.0, 10.0, 10.0], 40),
            cluster([128.0, 128.0, 128.0], 30),
            cluster([20.0, 200.0, 20.0], 10),
        ];
        assert_eq!(pick_cluster(&ranked), Rgb([240, 10, 10]));
    }

    #[test]
    fn test_pick_skips_extreme_centroids() {
        let ranked = [
            cluster([230.0, 230.0, 230.0], 50), // sum 690: too bright
            cluster([10.0, 10.0, 15.0], 30),    // sum 35: too dark
            cluster([100.4, 50.5, 20.6], 5),
        ];
        assert_eq!(pick_cluster(&ranked), Rgb([100, 51, 21]));
    }

    #[test]
    fn test_pick_brightness_bounds_are_exclusive() {
        let ranked = [
            cluster([250.0, 200.0, 200.0], 9), // sum 650
            cluster([20.0, 10.0, 10.0], 8),    // sum 40
            cluster([20.0, 10.0, 10.5], 7),    // sum 40.5
        ];
        assert_eq!(pick_cluster(&ranked), Rgb([20, 10, 11]));
    }

    #[test]
    fn test_pick_falls_back_to_most_populated() {
        let ranked = [
            cluster([240.0, 240.0, 240.0], 50),
            cluster([5.0, 5.0, 5.0], 10),
        ];
        assert_eq!(pick_cluster(&ranked), Rgb([240, 240, 240]));
    }

    #[test]
    fn test_pick_ignores_empty_clusters() {
        let ranked = [
            cluster([240.0, 240.0, 240.0], 12),
            cluster([100.0, 100.0, 100.0], 0),
        ];
        assert_eq!(pick_cluster(&ranked), Rgb([240, 240, 240]));
    }

    #[test]
    fn test_mixed_image_prefers_dominant_mid_tone() {
        // 70% red subject, 30% white backdrop: white is filtered out as highlight.
        let mut img = uniform(100, 10, [255, 255, 255]);
        for y in 0..10 {
            for x in 0..70 {
                img.put_pixel(x, y, Rgb([255, 0, 0]));
            }
        }
        let color = extract_ambient_color(&img, &AmbientConfig::default());
        assert_eq!(color, Rgb([255, 0, 0]));
    }

    #[test]
    fn test_noisy_image_is_deterministic() {
        let img = RgbImage::from_fn(37, 23, |x, y| {
            Rgb([(x * 7) as u8, (y * 11) as u8, ((x + y) * 5) as u8])
        });
        let color = extract_ambient_color(&img, &AmbientConfig::default());
        let again = extract_ambient_color(&img, &AmbientConfig::default());
        assert_eq!(color, again);
        assert_ne!(color, NEUTRAL_GRAY);
    }
}
