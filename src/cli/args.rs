//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

use crate::config::SegmentBackend;

/// Cut out the subject of a photo and render it on transparent, solid and
/// gradient backdrops
#[derive(Parser, Debug, Clone)]
#[command(
    version,
    about,
    long_about = None,
    arg_required_else_help = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Input image (png, jpeg, webp)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output directory (default: the input's directory)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Config file path (default: backdrop.toml, searched upward)
    #[arg(short = 'C', long, default_value = "backdrop.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Segmentation backend
    #[arg(short, long, value_enum)]
    pub segmenter: Option<SegmentBackend>,

    /// Number of k-means clusters for the ambient color
    #[arg(short = 'k', long)]
    pub clusters: Option<usize>,

    /// k-means seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Render variants one after another instead of in parallel
    #[arg(long)]
    pub sequential: bool,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,

    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Print version
    #[arg(long, action = clap::ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,
}
