//! Seeded Lloyd's k-means over 8-bit RGB samples.
//!
//! Centroids are seeded with k-means++ from a fixed RNG seed, refined with
//! assignment/update rounds until the total centroid shift drops below the
//! tolerance (or the iteration cap is hit), and the restart with the lowest
//! distortion wins. Restarts run on the rayon pool; restart `r` always uses
//! seed `seed + r`, so the result does not depend on scheduling.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// A cluster of color samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Mean color of the members (fractional until rounded).
    pub centroid: [f64; 3],
    /// Number of samples assigned to this cluster.
    pub members: usize,
}

impl Cluster {
    /// Sum of the centroid channels.
    #[inline]
    pub fn channel_sum(&self) -> f64 {
        self.centroid.iter().sum()
    }

    /// Centroid rounded to the nearest 8-bit color.
    pub fn rounded(&self) -> [u8; 3] {
        self.centroid.map(|c| c.round().clamp(0.0, 255.0) as u8)
    }
}

/// Lloyd's algorithm parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KMeans {
    pub k: usize,
    pub max_iterations: usize,
    pub restarts: usize,
    pub tolerance: f64,
    pub seed: u64,
}

/// Result of a single restart.
struct Fit {
    clusters: Vec<Cluster>,
    inertia: f64,
}

impl KMeans {
    /// Partition `samples` into `min(k, samples.len())` clusters.
    ///
    /// Clusters are returned in centroid index order. Returns an empty vector
    /// for empty input.
    pub fn fit(&self, samples: &[[u8; 3]]) -> Vec<Cluster> {
        let k = self.k.min(samples.len());
        if k == 0 {
            return Vec::new();
        }

        let points: Vec<[f64; 3]> = samples.iter().map(|s| s.map(f64::from)).collect();
        let fits: Vec<Fit> = (0..self.restarts.max(1))
            .into_par_iter()
            .map(|restart| self.fit_once(&points, k, self.seed.wrapping_add(restart as u64)))
            .collect();

        // `min_by` keeps the first of equal minima: lowest restart index wins ties.
        fits.into_iter()
            .min_by(|a, b| a.inertia.total_cmp(&b.inertia))
            .map(|fit| fit.clusters)
            .unwrap_or_default()
    }

    fn fit_once(&self, points: &[[f64; 3]], k: usize, seed: u64) -> Fit {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut centroids = seed_centroids(points, k, &mut rng);
        let mut labels = vec![0_usize; points.len()];

        for _ in 0..self.max_iterations {
            assign(points, &centroids, &mut labels);
            let updated = update(points, &labels, &centroids);
            let shift: f64 = centroids
                .iter()
                .zip(&updated)
                .map(|(old, new)| distance_sq(old, new))
                .sum();
            centroids = updated;
            if shift <= self.tolerance {
                break;
            }
        }

        let inertia = assign(points, &centroids, &mut labels);
        let mut members = vec![0_usize; k];
        for &label in &labels {
            members[label] += 1;
        }

        Fit {
            clusters: centroids
                .into_iter()
                .zip(members)
                .map(|(centroid, members)| Cluster { centroid, members })
                .collect(),
            inertia,
        }
    }
}

/// k-means++ seeding: each next centroid is drawn with probability
/// proportional to its squared distance from the nearest chosen one.
fn seed_centroids(points: &[[f64; 3]], k: usize, rng: &mut StdRng) -> Vec<[f64; 3]> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.random_range(0..points.len())]);

    let mut nearest: Vec<f64> = points.iter().map(|p| distance_sq(p, &centroids[0])).collect();

    while centroids.len() < k {
        let total: f64 = nearest.iter().sum();
        let next = if total > 0.0 {
            let mut target = rng.random::<f64>() * total;
            nearest
                .iter()
                .position(|&d| {
                    target -= d;
                    target <= 0.0 && d > 0.0
                })
                .unwrap_or_else(|| last_positive(&nearest))
        } else {
            // Every point coincides with a chosen centroid.
            rng.random_range(0..points.len())
        };

        let chosen = points[next];
        for (d, p) in nearest.iter_mut().zip(points) {
            *d = d.min(distance_sq(p, &chosen));
        }
        centroids.push(chosen);
    }

    centroids
}

/// Index of the last point with non-zero weight (rounding fallback).
fn last_positive(weights: &[f64]) -> usize {
    weights.iter().rposition(|&d| d > 0.0).unwrap_or(0)
}

/// Assign every point to its nearest centroid (ties go to the lower index).
///
/// Returns the distortion: the sum of squared distances to the assigned centroids.
fn assign(points: &[[f64; 3]], centroids: &[[f64; 3]], labels: &mut [usize]) -> f64 {
    let mut inertia = 0.0;
    for (point, label) in points.iter().zip(labels.iter_mut()) {
        let mut best = 0;
        let mut best_dist = f64::MAX;
        for (idx, centroid) in centroids.iter().enumerate() {
            let dist = distance_sq(point, centroid);
            if dist < best_dist {
                best_dist = dist;
                best = idx;
            }
        }
        *label = best;
        inertia += best_dist;
    }
    inertia
}

/// Move each centroid to the mean of its members. Empty clusters stay put.
fn update(points: &[[f64; 3]], labels: &[usize], centroids: &[[f64; 3]]) -> Vec<[f64; 3]> {
    let mut sums = vec![[0.0_f64; 3]; centroids.len()];
    let mut counts = vec![0_usize; centroids.len()];

    for (point, &label) in points.iter().zip(labels) {
        for c in 0..3 {
            sums[label][c] += point[c];
        }
        counts[label] += 1;
    }

    sums.into_iter()
        .zip(counts)
        .zip(centroids)
        .map(|((sum, count), old)| {
            if count == 0 {
                *old
            } else {
                sum.map(|s| s / count as f64)
            }
        })
        .collect()
}

#[inline]
fn distance_sq(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    dr * dr + dg * dg + db * db
}
