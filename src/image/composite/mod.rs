//! Compositing a normalized object onto a backdrop.
//!
//! | Background    | Canvas                     | Output |
//! |---------------|----------------------------|--------|
//! | `Transparent` | the object itself          | RGBA   |
//! | `Solid`       | `size x size`, one color   | RGB    |
//! | `Gradient`    | `size x size`, two stops   | RGB    |

mod blend;
mod gradient;

pub use gradient::Gradient;

use blend::overlay_centered;

use image::{DynamicImage, RgbImage, RgbaImage};

/// Backdrop fill for a composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    /// No canvas: the object keeps its own size and alpha.
    Transparent,
    /// Uniform fill.
    Solid(image::Rgb<u8>),
    /// Vertical light-to-dark gradient.
    Gradient(Gradient),
}

/// Place `object` on `background`.
///
/// `size` is the square canvas edge for solid and gradient backdrops and is
/// ignored for `Transparent`.
pub fn composite(object: RgbaImage, background: &Background, size: u32) -> DynamicImage {
    let mut canvas = match background {
        Background::Transparent => return DynamicImage::ImageRgba8(object),
        Background::Solid(color) => RgbImage::from_pixel(size, size, *color),
        Background::Gradient(gradient) => gradient.render(size),
    };

    overlay_centered(&mut canvas, &object);
    DynamicImage::ImageRgb8(canvas)
}
