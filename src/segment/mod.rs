//! Foreground segmentation.
//!
//! A [`Segmenter`] takes the original encoded image and returns an encoded
//! RGBA image whose background alpha has been driven to zero. The pipeline
//! treats it as an opaque capability and calls it exactly once per run.
//!
//! | Backend   | Type               | How                                      |
//! |-----------|--------------------|------------------------------------------|
//! | `command` | [`CommandSegmenter`] | external program over stdin/stdout     |
//! | `builtin` | [`EdgeSegmenter`]    | corner color + edge-connected fill     |

mod command;
mod edge;

pub use command::CommandSegmenter;
pub use edge::EdgeSegmenter;

use std::{io, process::ExitStatus};

use thiserror::Error;

use crate::config::{SegmentBackend, SegmentConfig};

/// Segmentation failures.
#[derive(Debug, Error)]
pub enum SegmentError {
    #[error("failed to run `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program}` failed with {status}{}", stderr_suffix(.stderr))]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("`{program}` produced no output")]
    EmptyOutput { program: String },

    #[error("cannot decode image for segmentation")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode segmented image")]
    Encode(#[source] image::ImageError),

    #[error("segmenter returned an undecodable image")]
    InvalidOutput(#[source] image::ImageError),
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!("\n{stderr}")
    }
}

/// Turns an encoded photo into an encoded cut-out with alpha.
pub trait Segmenter: Send + Sync {
    /// Short name for log lines.
    fn name(&self) -> &'static str;

    /// Segment `bytes` (any supported encoding) into an encoded RGBA image.
    fn segment(&self, bytes: &[u8]) -> Result<Vec<u8>, SegmentError>;
}

/// Build the segmenter selected by `config`.
pub fn from_config(config: &SegmentConfig) -> Box<dyn Segmenter> {
    match config.backend {
        SegmentBackend::Command => Box::new(CommandSegmenter::new(&config.command)),
        SegmentBackend::Builtin => Box::new(EdgeSegmenter::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_picks_backend() {
        let config = SegmentConfig::default();
        assert_eq!(from_config(&config).name(), "command");

        let config = SegmentConfig {
            backend: SegmentBackend::Builtin,
            ..Default::default()
        };
        assert_eq!(from_config(&config).name(), "builtin");
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_display_includes_stderr() {
        use std::os::unix::process::ExitStatusExt;

        let err = SegmentError::Failed {
            program: "rembg".into(),
            status: ExitStatus::from_raw(1 << 8),
            stderr: "model not found".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("`rembg` failed"));
        assert!(msg.ends_with("\nmodel not found"));
    }

    #[test]
    fn test_empty_output_display() {
        let err = SegmentError::EmptyOutput {
            program: "rembg".into(),
        };
        assert_eq!(err.to_string(), "`rembg` produced no output");
    }
}
