//! Pipeline error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::segment::SegmentError;

/// Everything that can abort a run. There are no retries; the first
/// failure is returned.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input file '{}' not found", .0.display())]
    MissingInput(PathBuf),

    #[error("failed to read `{}`", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {what}")]
    Decode {
        what: String,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Segmentation(#[from] SegmentError),

    #[error("failed to write `{}`", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl PipelineError {
    pub(super) fn write(path: PathBuf, source: io::Error) -> Self {
        Self::Encode {
            path,
            source: image::ImageError::IoError(source),
        }
    }
}
