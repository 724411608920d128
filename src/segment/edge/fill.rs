use image::RgbaImage;

/// Alpha each pixel takes if the fill reaches it. `None` blocks the fill.
pub(super) type RemovalMap = Vec<Option<u8>>;

/// Scanline flood fill from every border pixel through removable pixels,
/// writing their removal alpha. Removable regions that do not touch the
/// border are left alone.
pub(super) fn clear_border_connected(img: &mut RgbaImage, removal: &[Option<u8>]) {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    debug_assert_eq!(removal.len(), width as usize * height as usize);

    let index = |x: u32, y: u32| y as usize * width as usize + x as usize;
    let mut filled = vec![false; removal.len()];
    let open = |filled: &[bool], x: u32, y: u32| {
        let idx = index(x, y);
        !filled[idx] && removal[idx].is_some()
    };

    let mut stack: Vec<(u32, u32)> = Vec::with_capacity(2 * (width + height) as usize);
    for x in 0..width {
        stack.push((x, 0));
        stack.push((x, height - 1));
    }
    for y in 1..height.saturating_sub(1) {
        stack.push((0, y));
        stack.push((width - 1, y));
    }

    while let Some((x, y)) = stack.pop() {
        if !open(&filled, x, y) {
            continue;
        }

        let mut left = x;
        while left > 0 && open(&filled, left - 1, y) {
            left -= 1;
        }
        let mut right = x;
        while right + 1 < width && open(&filled, right + 1, y) {
            right += 1;
        }

        for cx in left..=right {
            let idx = index(cx, y);
            filled[idx] = true;
            if let Some(alpha) = removal[idx] {
                img.get_pixel_mut(cx, y)[3] = alpha;
            }
        }

        let above = y.checked_sub(1);
        let below = (y + 1 < height).then_some(y + 1);
        for ny in above.into_iter().chain(below) {
            // Push one seed per open run in [left, right].
            for cx in left..=right {
                if open(&filled, cx, ny) && (cx == left || !open(&filled, cx - 1, ny)) {
                    stack.push((cx, ny));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use image::{Rgba, RgbaImage};
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::*;

    /// Plain 4-connected BFS, used as the reference result.
    fn reference_fill(img: &mut RgbaImage, removal: &[Option<u8>]) {
        let (width, height) = img.dimensions();
        let index = |x: u32, y: u32| y as usize * width as usize + x as usize;
        let mut seen = vec![false; removal.len()];
        let mut queue = VecDeque::new();

        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
                    queue.push_back((x, y));
                }
            }
        }

        while let Some((x, y)) = queue.pop_front() {
            let idx = index(x, y);
            if seen[idx] {
                continue;
            }
            seen[idx] = true;
            let Some(alpha) = removal[idx] else {
                continue;
            };
            img.get_pixel_mut(x, y)[3] = alpha;

            if x > 0 {
                queue.push_back((x - 1, y));
            }
            if x + 1 < width {
                queue.push_back((x + 1, y));
            }
            if y > 0 {
                queue.push_back((x, y - 1));
            }
            if y + 1 < height {
                queue.push_back((x, y + 1));
            }
        }
    }

    #[test]
    fn test_matches_reference_on_random_maps() {
        for seed in 0_u64..48 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (width, height) = (31, 19);
            let removal: RemovalMap = (0..width * height)
                .map(|_| {
                    let roll: u8 = rng.random_range(0..100);
                    (roll >= 40).then(|| rng.random())
                })
                .collect();
            let img = RgbaImage::from_fn(width, height, |_, _| Rgba([rng.random(), 0, 0, 255]));

            let mut scanline = img.clone();
            let mut bfs = img;
            clear_border_connected(&mut scanline, &removal);
            reference_fill(&mut bfs, &removal);

            assert_eq!(scanline, bfs, "seed={seed}");
        }
    }

    #[test]
    fn test_blocked_region_untouched() {
        // Removable ring around a blocked cross; center is removable but enclosed.
        let (w, h) = (5, 5);
        let mut removal = vec![Some(0); 25];
        for i in 1..4 {
            removal[5 + i] = None;
            removal[15 + i] = None;
            removal[i * 5 + 1] = None;
            removal[i * 5 + 3] = None;
        }
        let mut img = RgbaImage::from_pixel(w, h, Rgba([1, 2, 3, 255]));
        clear_border_connected(&mut img, &removal);

        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(img.get_pixel(4, 2)[3], 0);
        assert_eq!(img.get_pixel(2, 2)[3], 255);
        assert_eq!(img.get_pixel(1, 1)[3], 255);
    }

    #[test]
    fn test_empty_image() {
        let mut img = RgbaImage::new(0, 0);
        clear_border_connected(&mut img, &[]);
    }
}
