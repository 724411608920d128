//! `[pipeline]` section configuration.
//!
//! ```toml
//! [pipeline]
//! parallel = true   # Render the three variants concurrently
//! ```

use serde::{Deserialize, Serialize};

/// Pipeline execution settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Render variants on the rayon pool. Output is identical either way.
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}
