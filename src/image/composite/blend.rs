use image::{Rgb, RgbImage, Rgba, RgbaImage};

/// Blend one channel: `fg * a + bg * (1 - a)`, with `a = alpha / 255`.
#[inline]
pub fn blend_channel(fg: u8, bg: u8, alpha: u8) -> u8 {
    let a = f32::from(alpha) / 255.0;
    (f32::from(fg) * a + f32::from(bg) * (1.0 - a))
        .round()
        .clamp(0.0, 255.0) as u8
}

/// Blend a foreground pixel over an opaque background pixel.
#[inline]
pub fn blend_pixel(fg: &Rgba<u8>, bg: &Rgb<u8>) -> Rgb<u8> {
    let alpha = fg[3];
    Rgb([
        blend_channel(fg[0], bg[0], alpha),
        blend_channel(fg[1], bg[1], alpha),
        blend_channel(fg[2], bg[2], alpha),
    ])
}

/// Top-left offset that centers `object` on `canvas` (floor division).
///
/// Negative when the object is larger than the canvas.
pub fn center_offset(canvas: (u32, u32), object: (u32, u32)) -> (i64, i64) {
    let offset = |c: u32, o: u32| (i64::from(c) - i64::from(o)).div_euclid(2);
    (offset(canvas.0, object.0), offset(canvas.1, object.1))
}

/// Alpha-blend `object` onto `canvas` at `offset`, clipping at the edges.
pub fn overlay(canvas: &mut RgbImage, object: &RgbaImage, offset: (i64, i64)) {
    let (canvas_w, canvas_h) = (i64::from(canvas.width()), i64::from(canvas.height()));

    for (x, y, fg) in object.enumerate_pixels() {
        if fg[3] == 0 {
            continue;
        }
        let cx = offset.0 + i64::from(x);
        let cy = offset.1 + i64::from(y);
        if cx < 0 || cy < 0 || cx >= canvas_w || cy >= canvas_h {
            continue;
        }

        let bg = canvas.get_pixel_mut(cx as u32, cy as u32);
        *bg = blend_pixel(fg, bg);
    }
}

/// Alpha-blend `object` onto the center of `canvas`.
pub fn overlay_centered(canvas: &mut RgbImage, object: &RgbaImage) {
    let offset = center_offset(canvas.dimensions(), object.dimensions());
    overlay(canvas, object, offset);
}
