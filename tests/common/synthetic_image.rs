//! Deterministic synthetic rasters for the detector tests.

/// Uniform image of a single grey level.
pub fn uniform_u8(width: usize, height: usize, value: u8) -> Vec<u8> {
    vec![value; width * height]
}

/// Paints a filled disk of `value` centered at `(cx, cy)` with radius `r`.
pub fn draw_disk(img: &mut [u8], width: usize, cx: i32, cy: i32, r: i32, value: u8) {
    let height = img.len() / width;
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r * r {
                img[y as usize * width + x as usize] = value;
            }
        }
    }
}

/// Paints the axis-aligned rectangle `[x0, x1) x [y0, y1)` with `value`.
pub fn draw_rect(img: &mut [u8], width: usize, x0: usize, y0: usize, x1: usize, y1: usize, value: u8) {
    for y in y0..y1 {
        for x in x0..x1 {
            img[y * width + x] = value;
        }
    }
}

/// Per-pixel negation, `255 - v`.
pub fn negated(img: &[u8]) -> Vec<u8> {
    img.iter().map(|&v| 255 - v).collect()
}

/// Number of pixels strictly darker than `threshold`.
pub fn count_below(img: &[u8], threshold: u8) -> u64 {
    img.iter().filter(|&&v| v < threshold).count() as u64
}
