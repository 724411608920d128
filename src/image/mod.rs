//! Image processing core.
//!
//! # Modules
//!
//! - [`ambient`]: representative color of the original photo (seeded k-means)
//! - [`normalize`]: crop to the opaque bounding box and fit a target size
//! - [`composite`]: background rendering and alpha blending

pub mod ambient;
pub mod composite;
pub mod normalize;

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, ImageResult, Rgb};

/// Sum of the three channels of an 8-bit color.
#[inline]
pub fn channel_sum(color: &Rgb<u8>) -> u32 {
    color.0.iter().map(|&c| u32::from(c)).sum()
}

/// Decode an encoded image, guessing the format from its magic bytes.
pub fn decode(bytes: &[u8]) -> ImageResult<DynamicImage> {
    image::load_from_memory(bytes)
}

/// Encode an image as PNG into memory.
pub fn encode_png(image: &DynamicImage) -> ImageResult<Vec<u8>> {
    let mut buf = Vec::new();
    image.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_channel_sum() {
        assert_eq!(channel_sum(&Rgb([255, 255, 255])), 765);
        assert_eq!(channel_sum(&Rgb([10, 20, 30])), 60);
    }

    #[test]
    fn test_png_keeps_alpha() {
        let mut img = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        img.put_pixel(1, 1, Rgba([0, 0, 0, 0]));

        let bytes = encode_png(&DynamicImage::ImageRgba8(img.clone())).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        assert_eq!(decode(&bytes).unwrap().to_rgba8(), img);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode(b"definitely not an image").is_err());
    }
}
