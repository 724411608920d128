//! `[segment]` section configuration.
//!
//! Chooses how the foreground object is cut out of the photo.
//!
//! # Example
//!
//! ```toml
//! [segment]
//! backend = "command"        # "command" | "builtin"
//! command = ["rembg", "i"]   # Program + args; reads stdin, writes stdout
//! ```
//!
//! The external program receives the original encoded image on stdin and
//! must write an encoded RGBA image to stdout.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Segmentation backend.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SegmentBackend {
    /// Pipe the image through an external program.
    #[default]
    Command,
    /// Built-in corner-color flood fill.
    Builtin,
}

/// Segmentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentConfig {
    pub backend: SegmentBackend,

    /// Program followed by its arguments. `~` in the program is expanded.
    pub command: Vec<String>,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            backend: SegmentBackend::Command,
            command: vec!["rembg".into(), "i".into()],
        }
    }
}

impl SegmentConfig {
    const BACKEND: FieldPath = FieldPath::new("segment.backend");
    const COMMAND: FieldPath = FieldPath::new("segment.command");

    /// Validate segmentation configuration.
    ///
    /// The command is only checked when it will actually be used.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.backend != SegmentBackend::Command {
            return;
        }

        let Some(program) = self.command.first().filter(|p| !p.trim().is_empty()) else {
            diag.error_with_hint(
                Self::COMMAND,
                "must name a program",
                "e.g. command = [\"rembg\", \"i\"]",
            );
            return;
        };

        let program = crate::utils::path::expand_tilde(Path::new(program));
        if which::which(&program).is_err() {
            diag.error_with_hint(
                Self::COMMAND,
                format!("`{}` command not found", program.display()),
                format!(
                    "install it, or set {} = \"builtin\" (or pass `--segmenter builtin`)",
                    Self::BACKEND
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_segment_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.segment.backend, SegmentBackend::Command);
        assert_eq!(config.segment.command, vec!["rembg", "i"]);
    }

    #[test]
    fn test_segment_builtin_backend() {
        let config = test_parse_config("[segment]\nbackend = \"builtin\"");
        assert_eq!(config.segment.backend, SegmentBackend::Builtin);
    }

    #[test]
    fn test_segment_custom_command() {
        let config = test_parse_config("[segment]\ncommand = [\"backgroundremover\", \"-i\", \"-\"]");
        assert_eq!(config.segment.command.len(), 3);
        assert_eq!(config.segment.command[0], "backgroundremover");
    }

    #[test]
    fn test_invalid_backend_rejected() {
        let result: Result<SegmentConfig, _> = toml::from_str("backend = \"magic\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_empty_command() {
        let config = SegmentConfig {
            command: vec![],
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert_eq!(diag.len(), 1);
        assert!(diag.errors()[0].message.contains("program"));
    }

    #[test]
    fn test_validate_missing_program() {
        let config = SegmentConfig {
            command: vec!["definitely-not-a-real-segmenter-binary".into()],
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert_eq!(diag.len(), 1);
        assert!(diag.errors()[0].message.contains("not found"));
    }

    #[test]
    fn test_validate_skips_command_for_builtin() {
        let config = SegmentConfig {
            backend: SegmentBackend::Builtin,
            command: vec![],
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert!(diag.is_empty());
    }
}
