//! Backdrop rendering pipeline.
//!
//! ```text
//! input bytes ──decode──> original ──ambient──> color ─────────┐
//!      │                                                         │
//!      └──segment (once)──> cut-out ──┬─ normalize(480) ─ transparent
//!                                     ├─ normalize(435) ─ solid(color)
//!                                     └─ normalize(435) ─ gradient(color)
//! ```
//!
//! The three variants only read the shared cut-out and ambient color, so
//! they are rendered on the rayon pool unless `pipeline.parallel` is off.
//! Output bytes do not depend on which mode was used.

mod error;
mod variant;

pub use error::PipelineError;
pub use variant::Variant;

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use image::{DynamicImage, Rgb, RgbaImage};

use crate::{
    config::AppConfig,
    debug,
    image::{
        ambient::extract_ambient_color,
        composite::{Background, Gradient, composite},
        decode, encode_png,
        normalize::normalize_object,
    },
    log,
    segment::{SegmentError, Segmenter},
    utils::path::variant_path,
};

/// A rendered, not yet encoded variant.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub variant: Variant,
    pub image: DynamicImage,
}

/// All variants of one input, in [`Variant::ALL`] order.
#[derive(Debug, Clone)]
pub struct Renders {
    pub ambient: Rgb<u8>,
    pub variants: Vec<Rendered>,
}

/// Runs decode, segmentation, ambient extraction and compositing.
pub struct Pipeline<'a> {
    config: &'a AppConfig,
    segmenter: &'a dyn Segmenter,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a AppConfig, segmenter: &'a dyn Segmenter) -> Self {
        Self { config, segmenter }
    }

    /// Render every variant of `input` into `output_dir` as
    /// `<stem>_<variant>.png`. Returns the written paths.
    pub fn run(&self, input: &Path, output_dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
        if !input.is_file() {
            return Err(PipelineError::MissingInput(input.to_path_buf()));
        }
        let bytes = fs::read(input).map_err(|source| PipelineError::Read {
            path: input.to_path_buf(),
            source,
        })?;

        let renders = self.render(&bytes)?;
        let [r, g, b] = renders.ambient.0;
        log!("ambient"; "rgb({}, {}, {})", r, g, b);

        fs::create_dir_all(output_dir)
            .map_err(|err| PipelineError::write(output_dir.to_path_buf(), err))?;

        let mut written = Vec::with_capacity(renders.variants.len());
        for rendered in &renders.variants {
            let path = variant_path(output_dir, input, rendered.variant.suffix());
            write_png(&rendered.image, &path)?;
            log!("write"; "{}", path.display());
            written.push(path);
        }
        Ok(written)
    }

    /// Render every variant of an encoded image, in memory.
    pub fn render(&self, bytes: &[u8]) -> Result<Renders, PipelineError> {
        let original = decode(bytes).map_err(|source| PipelineError::Decode {
            what: "input image".into(),
            source,
        })?;
        debug!("render"; "input {}x{}", original.width(), original.height());

        let started = Instant::now();
        log!("segment"; "cutting out object with {} segmenter", self.segmenter.name());
        let cut_out = self.segmenter.segment(bytes)?;
        let cut_out = decode(&cut_out)
            .map_err(SegmentError::InvalidOutput)?
            .to_rgba8();
        debug!("segment"; "done in {:.2?}", started.elapsed());

        let started = Instant::now();
        let ambient = extract_ambient_color(&original.to_rgb8(), &self.config.ambient);
        debug!("ambient"; "done in {:.2?}", started.elapsed());

        let started = Instant::now();
        let variants = self.render_variants(&cut_out, ambient);
        debug!("render"; "{} variants in {:.2?}", variants.len(), started.elapsed());

        Ok(Renders { ambient, variants })
    }

    fn render_variants(&self, cut_out: &RgbaImage, ambient: Rgb<u8>) -> Vec<Rendered> {
        let render = |variant: Variant| Rendered {
            variant,
            image: self.render_variant(variant, cut_out, ambient),
        };

        if self.config.pipeline.parallel {
            let (transparent, (solid, gradient)) = rayon::join(
                || render(Variant::Transparent),
                || rayon::join(|| render(Variant::Solid), || render(Variant::Gradient)),
            );
            vec![transparent, solid, gradient]
        } else {
            Variant::ALL.into_iter().map(render).collect()
        }
    }

    /// Normalize the cut-out for `variant` and composite it.
    pub fn render_variant(
        &self,
        variant: Variant,
        cut_out: &RgbaImage,
        ambient: Rgb<u8>,
    ) -> DynamicImage {
        let canvas = &self.config.canvas;
        let (target, background) = match variant {
            Variant::Transparent => (canvas.transparent_size, Background::Transparent),
            Variant::Solid => (canvas.object_size(), Background::Solid(ambient)),
            Variant::Gradient => (
                canvas.object_size(),
                Background::Gradient(Gradient::from_base(
                    ambient,
                    canvas.light_factor,
                    canvas.dark_factor,
                )),
            ),
        };

        let object = normalize_object(cut_out, target);
        debug!("render"; "{}: object {}x{}", variant, object.width(), object.height());
        composite(object, &background, canvas.size)
    }
}

fn write_png(image: &DynamicImage, path: &Path) -> Result<(), PipelineError> {
    let bytes = encode_png(image).map_err(|source| PipelineError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, bytes).map_err(|err| PipelineError::write(path.to_path_buf(), err))
}
