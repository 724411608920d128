//! backdrop - cut out the subject of a photo and render it on transparent,
//! solid and gradient backdrops.

mod cli;
mod config;
mod image;
mod logger;
mod pipeline;
mod segment;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::Cli;
use config::AppConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    if let Err(code) = cli::render::check_input(&cli) {
        std::process::exit(code);
    }

    let config = AppConfig::load(&cli)?;
    cli::render::render(&cli, &config)
}
