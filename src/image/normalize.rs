//! Object normalization: crop a segmented image to its visible content and
//! scale it so the longer side hits a target size.

use image::{RgbaImage, imageops};

/// Inclusive-exclusive pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Box covering the whole image.
    pub fn full(img: &RgbaImage) -> Self {
        Self {
            x: 0,
            y: 0,
            width: img.width(),
            height: img.height(),
        }
    }
}

/// Smallest rectangle enclosing every pixel with non-zero alpha.
///
/// Returns `None` when the image is fully transparent.
pub fn bounding_box(img: &RgbaImage) -> Option<BoundingBox> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0;
    let mut max_y = 0;
    let mut found = false;

    for (x, y, pixel) in img.enumerate_pixels() {
        if pixel[3] == 0 {
            continue;
        }
        found = true;
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    found.then(|| BoundingBox {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}

/// Scale `width x height` so the longer side equals `target`.
///
/// The shorter side is scaled proportionally and rounded, never below 1.
pub fn fit_dimensions(width: u32, height: u32, target: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width, height);
    }

    let scale = |side: u32, longest: u32| {
        ((f64::from(side) * f64::from(target) / f64::from(longest)).round() as u32).max(1)
    };
    if width >= height {
        (target, scale(height, width))
    } else {
        (scale(width, height), target)
    }
}

/// Crop `img` to its bounding box and resize it so the longer side is `target`.
///
/// A fully transparent image is scaled as a whole. The source is never
/// modified; every call produces a fresh buffer.
pub fn normalize_object(img: &RgbaImage, target: u32) -> RgbaImage {
    let bbox = bounding_box(img).unwrap_or_else(|| BoundingBox::full(img));
    if bbox.width == 0 || bbox.height == 0 || target == 0 {
        return img.clone();
    }

    let cropped = imageops::crop_imm(img, bbox.x, bbox.y, bbox.width, bbox.height).to_image();
    let (width, height) = fit_dimensions(bbox.width, bbox.height, target);
    if (width, height) == cropped.dimensions() {
        return cropped;
    }

    imageops::resize(&cropped, width, height, imageops::FilterType::Lanczos3)
}
