//! `[ambient]` section configuration.
//!
//! Controls how the representative color of the original photo is found.
//!
//! # Example
//!
//! ```toml
//! [ambient]
//! clusters = 5          # Number of k-means clusters
//! seed = 42             # RNG seed for centroid seeding
//! max_iterations = 300  # Lloyd iteration cap per restart
//! restarts = 10         # Restarts; the lowest distortion wins
//! tolerance = 1e-4      # Stop when total centroid shift drops below this
//! sample_edge = 100     # Longest side of the sampling thumbnail (px)
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::image::ambient::KMeans;

/// Ambient color extraction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientConfig {
    /// Number of clusters (k). Capped by the number of samples.
    pub clusters: usize,

    /// Seed for k-means++ initialization. Restart `r` uses `seed + r`.
    pub seed: u64,

    /// Iteration cap per restart.
    pub max_iterations: usize,

    /// Independent restarts.
    pub restarts: usize,

    /// Convergence threshold on the summed squared centroid shift.
    pub tolerance: f64,

    /// The photo is shrunk so its longest side is at most this many pixels
    /// before sampling.
    pub sample_edge: u32,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            clusters: 5,
            seed: 42,
            max_iterations: 300,
            restarts: 10,
            tolerance: 1e-4,
            sample_edge: 100,
        }
    }
}

impl AmbientConfig {
    const CLUSTERS: FieldPath = FieldPath::new("ambient.clusters");
    const MAX_ITERATIONS: FieldPath = FieldPath::new("ambient.max_iterations");
    const RESTARTS: FieldPath = FieldPath::new("ambient.restarts");
    const TOLERANCE: FieldPath = FieldPath::new("ambient.tolerance");
    const SAMPLE_EDGE: FieldPath = FieldPath::new("ambient.sample_edge");

    /// k-means parameters for this configuration.
    pub fn kmeans(&self) -> KMeans {
        KMeans {
            k: self.clusters,
            max_iterations: self.max_iterations,
            restarts: self.restarts,
            tolerance: self.tolerance,
            seed: self.seed,
        }
    }

    /// Validate ambient configuration.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.clusters == 0 {
            diag.error(Self::CLUSTERS, "must be at least 1");
        }
        if self.max_iterations == 0 {
            diag.error(Self::MAX_ITERATIONS, "must be at least 1");
        }
        if self.restarts == 0 {
            diag.error(Self::RESTARTS, "must be at least 1");
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            diag.error(Self::TOLERANCE, "must be a finite, non-negative number");
        }
        if self.sample_edge == 0 {
            diag.error_with_hint(
                Self::SAMPLE_EDGE,
                "must be at least 1",
                "100 is plenty for a representative color",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_ambient_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.ambient, AmbientConfig::default());
        assert_eq!(config.ambient.clusters, 5);
        assert_eq!(config.ambient.sample_edge, 100);
    }

    #[test]
    fn test_ambient_partial_override() {
        let config = test_parse_config("[ambient]\nclusters = 3\nseed = 7");
        assert_eq!(config.ambient.clusters, 3);
        assert_eq!(config.ambient.seed, 7);
        assert_eq!(config.ambient.restarts, 10);
    }

    #[test]
    fn test_kmeans_parameters() {
        let kmeans = AmbientConfig::default().kmeans();
        assert_eq!(kmeans.k, 5);
        assert_eq!(kmeans.seed, 42);
        assert_eq!(kmeans.max_iterations, 300);
    }

    #[test]
    fn test_validate_rejects_zero_counts() {
        let config = AmbientConfig {
            clusters: 0,
            restarts: 0,
            tolerance: -1.0,
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert_eq!(diag.len(), 3);
    }
}
