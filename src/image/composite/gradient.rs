use image::{Rgb, RgbImage};

/// Vertical two-stop gradient derived from a base color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    /// Color of the top row.
    pub light: Rgb<u8>,
    /// Color the gradient approaches at the bottom row.
    pub dark: Rgb<u8>,
}

impl Gradient {
    /// Scale each channel of `base` by `light_factor` (top) and `dark_factor`
    /// (bottom), truncating and clamping to 255.
    pub fn from_base(base: Rgb<u8>, light_factor: f64, dark_factor: f64) -> Self {
        let scale = |factor: f64| Rgb(base.0.map(|c| (f64::from(c) * factor).min(255.0) as u8));
        Self {
            light: scale(light_factor),
            dark: scale(dark_factor),
        }
    }

    /// Color of row `y` on a canvas `size` rows tall.
    ///
    /// Interpolates with `frac = y / size`, so the last row stops one step
    /// short of `dark`. Channels are truncated.
    pub fn row_color(&self, y: u32, size: u32) -> Rgb<u8> {
        let frac = if size == 0 {
            0.0
        } else {
            f64::from(y) / f64::from(size)
        };
        let mut out = [0_u8; 3];
        for (c, value) in out.iter_mut().enumerate() {
            let light = f64::from(self.light[c]);
            let dark = f64::from(self.dark[c]);
            *value = (light + (dark - light) * frac) as u8;
        }
        Rgb(out)
    }

    /// Render a `size x size` canvas filled with the gradient.
    pub fn render(&self, size: u32) -> RgbImage {
        let rows: Vec<Rgb<u8>> = (0..size).map(|y| self.row_color(y, size)).collect();
        RgbImage::from_fn(size, size, |_, y| rows[y as usize])
    }
}
