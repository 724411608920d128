//! The `backdrop <INPUT>` command.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;

use crate::{
    cli::Cli,
    config::AppConfig,
    debug, log,
    pipeline::{Pipeline, PipelineError},
    segment,
};

/// Process exit code for any failed run.
pub const EXIT_FAILURE: i32 = 1;

/// Reject a missing input before any config is loaded.
///
/// Returns the exit code the process should end with.
pub fn check_input(cli: &Cli) -> Result<(), i32> {
    if cli.input.is_file() {
        return Ok(());
    }
    let err = PipelineError::MissingInput(cli.input.clone());
    log!("error"; "{}", err);
    Err(EXIT_FAILURE)
}

/// Directory the outputs go to: `--output`, else next to the input.
pub fn output_dir(cli: &Cli) -> PathBuf {
    match &cli.output {
        Some(dir) => crate::utils::path::expand_tilde(dir),
        None => cli
            .input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
    }
}

/// Render all variants of the CLI input with the loaded config.
pub fn render(cli: &Cli, config: &AppConfig) -> Result<()> {
    if let Some(path) = &config.config_path {
        debug!("config"; "using {}", path.display());
    }

    let started = Instant::now();
    let segmenter = segment::from_config(&config.segment);
    let output = output_dir(cli);

    let written = Pipeline::new(config, segmenter.as_ref()).run(&cli.input, &output)?;

    log!(
        "render";
        "{} variants of {} in {:.2?}",
        written.len(),
        cli.input.display(),
        started.elapsed()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
    use tempfile::TempDir;

    use crate::config::SegmentBackend;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("backdrop").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_output_dir_defaults_to_input_dir() {
        assert_eq!(output_dir(&cli(&["shots/cat.jpg"])), PathBuf::from("shots"));
        assert_eq!(output_dir(&cli(&["cat.jpg"])), PathBuf::from("."));
        assert_eq!(
            output_dir(&cli(&["cat.jpg", "-o", "/tmp/out"])),
            PathBuf::from("/tmp/out")
        );
    }

    #[test]
    fn test_check_input() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.png");
        assert_eq!(check_input(&cli(&[missing.to_str().unwrap()])), Err(EXIT_FAILURE));
        assert_ne!(EXIT_FAILURE, 0);
        assert_eq!(
            PipelineError::MissingInput(missing.clone()).to_string(),
            format!("input file '{}' not found", missing.display())
        );

        // A directory is not an input file either.
        assert_eq!(check_input(&cli(&[dir.path().to_str().unwrap()])), Err(EXIT_FAILURE));

        let present = dir.path().join("cat.png");
        std::fs::write(&present, b"").unwrap();
        assert_eq!(check_input(&cli(&[present.to_str().unwrap()])), Ok(()));
    }

    #[test]
    fn test_render_with_builtin_segmenter() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("mug.png");
        let photo = RgbImage::from_fn(120, 80, |x, y| {
            if (30..90).contains(&x) && (20..60).contains(&y) {
                Rgb([20, 60, 180])
            } else {
                Rgb([245, 245, 245])
            }
        });
        DynamicImage::ImageRgb8(photo).save(&input).unwrap();

        let out = dir.path().join("out");
        let args = cli(&[
            input.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "-s",
            "builtin",
        ]);
        let mut config = AppConfig::default();
        config.segment.backend = SegmentBackend::Builtin;

        render(&args, &config).unwrap();

        let transparent = image::open(out.join("mug_transparent.png")).unwrap();
        assert_eq!(transparent.dimensions(), (480, 320));
        for name in ["mug_solid.png", "mug_gradient.png"] {
            assert_eq!(image::open(out.join(name)).unwrap().dimensions(), (512, 512));
        }
    }
}
