//! `[canvas]` section configuration.
//!
//! Output geometry and gradient stops.
//!
//! # Example
//!
//! ```toml
//! [canvas]
//! size = 512              # Edge of the solid and gradient canvases (px)
//! object_scale = 0.85     # Object fits round(size * object_scale)
//! transparent_size = 480  # Longest side of the transparent cut-out (px)
//! light_factor = 1.3      # Top gradient stop = ambient * light_factor
//! dark_factor = 0.7       # Bottom gradient stop = ambient * dark_factor
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Canvas geometry settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Edge length of the square solid and gradient canvases.
    pub size: u32,

    /// Fraction of `size` the object's longer side is scaled to.
    pub object_scale: f64,

    /// Longer side of the transparent cut-out.
    pub transparent_size: u32,

    /// Multiplier for the top gradient stop (clamped to 255).
    pub light_factor: f64,

    /// Multiplier for the bottom gradient stop.
    pub dark_factor: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            size: 512,
            object_scale: 0.85,
            transparent_size: 480,
            light_factor: 1.3,
            dark_factor: 0.7,
        }
    }
}

impl CanvasConfig {
    const SIZE: FieldPath = FieldPath::new("canvas.size");
    const OBJECT_SCALE: FieldPath = FieldPath::new("canvas.object_scale");
    const TRANSPARENT_SIZE: FieldPath = FieldPath::new("canvas.transparent_size");
    const LIGHT_FACTOR: FieldPath = FieldPath::new("canvas.light_factor");
    const DARK_FACTOR: FieldPath = FieldPath::new("canvas.dark_factor");

    /// Target size of the object on the solid and gradient canvases.
    pub fn object_size(&self) -> u32 {
        (f64::from(self.size) * self.object_scale).round() as u32
    }

    /// Validate canvas configuration.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.size == 0 {
            diag.error(Self::SIZE, "must be at least 1");
        }
        if self.transparent_size == 0 {
            diag.error(Self::TRANSPARENT_SIZE, "must be at least 1");
        }
        if !(self.object_scale > 0.0 && self.object_scale <= 1.0) {
            diag.error_with_hint(
                Self::OBJECT_SCALE,
                "must be in (0, 1]",
                "use 0.85 to leave a margin around the object",
            );
        } else if self.size > 0 && self.object_size() == 0 {
            diag.error(Self::OBJECT_SCALE, "scales the object to zero pixels");
        }
        for (field, factor) in [
            (Self::LIGHT_FACTOR, self.light_factor),
            (Self::DARK_FACTOR, self.dark_factor),
        ] {
            if !factor.is_finite() || factor <= 0.0 {
                diag.error(field, "must be a finite, positive number");
            }
        }
        if self.light_factor < self.dark_factor {
            diag.hint(
                Self::LIGHT_FACTOR,
                "is below dark_factor; the gradient will brighten downwards",
            );
        }
    }
}
