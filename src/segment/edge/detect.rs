use image::RgbaImage;
use lab::Lab;

/// Side of the square sampled at each corner.
const WINDOW: u32 = 5;
/// Nearly transparent samples say nothing about the backdrop.
const MIN_SAMPLE_ALPHA: u8 = 8;
/// ΔE under which two samples count as the same color.
const MERGE_DELTA: f32 = 8.0;

const WHITE: Lab = Lab {
    l: 100.0,
    a: 0.0,
    b: 0.0,
};

/// Squared ΔE (CIE76) between two LAB colors.
#[inline]
pub(super) fn delta_e_sq(c1: &Lab, c2: &Lab) -> f32 {
    let dl = c1.l - c2.l;
    let da = c1.a - c2.a;
    let db = c1.b - c2.b;
    dl * dl + da * da + db * db
}

/// Alpha-weighted running mean of similar corner samples.
#[derive(Clone, Copy)]
struct Bucket {
    sum: [f32; 3],
    weight: f32,
}

impl Bucket {
    fn new(lab: Lab, weight: f32) -> Self {
        Self {
            sum: [lab.l * weight, lab.a * weight, lab.b * weight],
            weight,
        }
    }

    fn mean(&self) -> Lab {
        let w = self.weight.max(f32::EPSILON);
        Lab {
            l: self.sum[0] / w,
            a: self.sum[1] / w,
            b: self.sum[2] / w,
        }
    }

    fn absorb(&mut self, lab: Lab, weight: f32) {
        self.sum[0] += lab.l * weight;
        self.sum[1] += lab.a * weight;
        self.sum[2] += lab.b * weight;
        self.weight += weight;
    }
}

/// Guess the backdrop color from the four corners.
///
/// Samples a small window at each corner, groups samples by ΔE and returns
/// the mean of the heaviest group. Falls back to white when every corner
/// pixel is transparent.
pub(super) fn backdrop_color(img: &RgbaImage) -> Lab {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return WHITE;
    }

    let right = width.saturating_sub(WINDOW);
    let bottom = height.saturating_sub(WINDOW);
    let mut buckets: Vec<Bucket> = Vec::new();

    for (ox, oy) in [(0, 0), (right, 0), (0, bottom), (right, bottom)] {
        for y in oy..(oy + WINDOW).min(height) {
            for x in ox..(ox + WINDOW).min(width) {
                let px = img.get_pixel(x, y);
                if px[3] < MIN_SAMPLE_ALPHA {
                    continue;
                }
                let lab = Lab::from_rgb(&[px[0], px[1], px[2]]);
                let weight = (f32::from(px[3]) / 255.0).max(0.1);
                add_sample(&mut buckets, lab, weight);
            }
        }
    }

    buckets
        .iter()
        .max_by(|a, b| a.weight.total_cmp(&b.weight))
        .map_or(WHITE, Bucket::mean)
}

fn add_sample(buckets: &mut Vec<Bucket>, lab: Lab, weight: f32) {
    let nearest = buckets
        .iter()
        .enumerate()
        .map(|(idx, bucket)| (idx, delta_e_sq(&bucket.mean(), &lab)))
        .min_by(|a, b| a.1.total_cmp(&b.1));

    match nearest {
        Some((idx, dist_sq)) if dist_sq <= MERGE_DELTA * MERGE_DELTA => {
            buckets[idx].absorb(lab, weight);
        }
        _ => buckets.push(Bucket::new(lab, weight)),
    }
}
