//! Configuration section definitions.
//!
//! Each module corresponds to a section in `backdrop.toml`:
//!
//! | Module     | TOML Section  | Purpose                              |
//! |------------|---------------|--------------------------------------|
//! | `ambient`  | `[ambient]`   | k-means color extraction             |
//! | `canvas`   | `[canvas]`    | Output sizes and gradient stops      |
//! | `segment`  | `[segment]`   | Foreground segmentation backend      |
//! | `pipeline` | `[pipeline]`  | Parallel or sequential rendering     |

mod ambient;
mod canvas;
mod pipeline;
mod segment;

pub use ambient::AmbientConfig;
pub use canvas::CanvasConfig;
pub use pipeline::PipelineConfig;
pub use segment::{SegmentBackend, SegmentConfig};
