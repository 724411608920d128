//! Built-in segmentation for photos shot against a plain backdrop.
//!
//! 1. Guess the backdrop color from the corners (LAB, ΔE grouping).
//! 2. Rate every pixel by its ΔE to that color: within `core_delta` it is
//!    background, up to `edge_delta` it is an anti-aliased edge and keeps a
//!    proportional share of its alpha.
//! 3. Flood fill from the border, so only backdrop connected to the frame is
//!    removed and same-colored areas inside the object survive.

mod detect;
mod fill;

use image::{DynamicImage, RgbaImage};
use lab::{Lab, rgb_bytes_to_labs};
use rayon::prelude::*;

use super::{SegmentError, Segmenter};
use crate::{debug, image::decode, image::encode_png};
use detect::{backdrop_color, delta_e_sq};
use fill::{RemovalMap, clear_border_connected};

/// Corner-color flood fill segmenter.
#[derive(Debug, Clone, Copy)]
pub struct EdgeSegmenter {
    /// ΔE at or below which a pixel is fully removed.
    pub core_delta: f32,
    /// ΔE up to which a pixel is partially removed.
    pub edge_delta: f32,
}

impl Default for EdgeSegmenter {
    fn default() -> Self {
        Self {
            core_delta: 10.0,
            edge_delta: 25.0,
        }
    }
}

impl Segmenter for EdgeSegmenter {
    fn name(&self) -> &'static str {
        "builtin"
    }

    fn segment(&self, bytes: &[u8]) -> Result<Vec<u8>, SegmentError> {
        let mut img = decode(bytes).map_err(SegmentError::Decode)?.to_rgba8();
        self.cut_out(&mut img);
        encode_png(&DynamicImage::ImageRgba8(img)).map_err(SegmentError::Encode)
    }
}

impl EdgeSegmenter {
    /// Make the border-connected backdrop of `img` transparent in place.
    pub fn cut_out(&self, img: &mut RgbaImage) {
        if img.width() == 0 || img.height() == 0 {
            return;
        }

        let backdrop = backdrop_color(img);
        debug!("segment"; "backdrop LAB ({:.1}, {:.1}, {:.1})", backdrop.l, backdrop.a, backdrop.b);

        let removal = self.removal_map(img, &backdrop);
        clear_border_connected(img, &removal);
    }

    fn removal_map(&self, img: &RgbaImage, backdrop: &Lab) -> RemovalMap {
        let rgb: Vec<u8> = img.pixels().flat_map(|px| [px[0], px[1], px[2]]).collect();
        let labs = rgb_bytes_to_labs(&rgb);

        img.as_raw()
            .par_chunks_exact(4)
            .zip(labs.par_iter())
            .map(|(px, lab)| self.removal_alpha(px[3], lab, backdrop))
            .collect()
    }

    /// Alpha a pixel ends with if it is reached by the fill.
    fn removal_alpha(&self, alpha: u8, lab: &Lab, backdrop: &Lab) -> Option<u8> {
        if alpha == 0 {
            return Some(0);
        }

        let dist_sq = delta_e_sq(lab, backdrop);
        if dist_sq <= self.core_delta * self.core_delta {
            return Some(0);
        }
        if dist_sq > self.edge_delta * self.edge_delta {
            return None;
        }

        let span = (self.edge_delta - self.core_delta).max(f32::EPSILON);
        let keep = ((dist_sq.sqrt() - self.core_delta) / span).clamp(0.0, 1.0);
        Some((f32::from(alpha) * keep).round() as u8)
    }
}
