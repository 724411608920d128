//! External-program segmentation.

use std::path::Path;

use super::{SegmentError, Segmenter};
use crate::{debug, utils::exec::Cmd, utils::path::expand_tilde};

/// Pipes the encoded photo through an external matting tool
/// (e.g. `rembg i`), reading the encoded cut-out from stdout.
#[derive(Debug, Clone)]
pub struct CommandSegmenter {
    command: Vec<String>,
}

impl CommandSegmenter {
    pub fn new(command: &[String]) -> Self {
        let mut command = command.to_vec();
        if let Some(program) = command.first_mut() {
            *program = expand_tilde(Path::new(program.as_str()))
                .to_string_lossy()
                .into_owned();
        }
        Self { command }
    }
}

impl Segmenter for CommandSegmenter {
    fn name(&self) -> &'static str {
        "command"
    }

    fn segment(&self, bytes: &[u8]) -> Result<Vec<u8>, SegmentError> {
        let cmd = Cmd::from_slice(&self.command).stdin(bytes);
        let program = cmd.program_name();
        debug!("segment"; "running `{}` on {} bytes", self.command.join(" "), bytes.len());

        let output = cmd.run().map_err(|source| SegmentError::Spawn {
            program: program.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(SegmentError::Failed {
                program,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        if output.stdout.is_empty() {
            return Err(SegmentError::EmptyOutput { program });
        }

        Ok(output.stdout)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn segmenter(args: &[&str]) -> CommandSegmenter {
        let command: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        CommandSegmenter::new(&command)
    }

    #[test]
    fn test_passes_bytes_through() {
        let out = segmenter(&["cat"]).segment(b"encoded").unwrap();
        assert_eq!(out, b"encoded");
    }

    #[test]
    fn test_nonzero_exit_is_failed() {
        let err = segmenter(&["sh", "-c", "echo 'no model' >&2; exit 2"])
            .segment(b"x")
            .unwrap_err();
        match err {
            SegmentError::Failed { status, stderr, .. } => {
                assert_eq!(status.code(), Some(2));
                assert_eq!(stderr, "no model");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_stdout_is_error() {
        let err = segmenter(&["true"]).segment(b"x").unwrap_err();
        assert!(matches!(err, SegmentError::EmptyOutput { .. }));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let err = segmenter(&["definitely-not-a-real-segmenter-binary"])
            .segment(b"x")
            .unwrap_err();
        assert!(matches!(err, SegmentError::Spawn { .. }));
    }
}
