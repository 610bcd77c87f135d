//! Concrete graph binding for 8-bit grayscale rasters with 4-connectivity.

use crate::graph::{GraphAccessor, PriorityFrontier};
use crate::image::ImageU8;

/// Pixel coordinate, the node index of the raster graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelIndex {
    pub x: i32,
    pub y: i32,
}

/// Probe order of the neighbor cursor.
const OFFSETS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Mask value once a pixel's cursor has tried every direction.
const CURSOR_DONE: u8 = 5;

/// 4-connected weighted-graph view of a grayscale image.
///
/// The visit mask doubles as the neighbor cursor: 0 marks an unreached
/// pixel, 1..=4 the next direction to probe, 5 an exhausted cursor. Marking
/// on discovery is what guarantees every pixel is handed out at most once.
pub struct RasterAccessor<'a> {
    image: ImageU8<'a>,
    mask: Vec<u8>,
}

impl<'a> RasterAccessor<'a> {
    pub fn new(image: ImageU8<'a>) -> Self {
        let mask = vec![0u8; image.w * image.h];
        Self { image, mask }
    }

    #[inline]
    fn mask_index(&self, node: PixelIndex) -> usize {
        node.y as usize * self.image.w + node.x as usize
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.image.w && (y as usize) < self.image.h
    }
}

impl GraphAccessor for RasterAccessor<'_> {
    type NodeIndex = PixelIndex;
    type Value = i32;

    // Strictly outside the 8-bit range, so the sentinel component outranks
    // every real level and the terminal flush records one step past 255.
    const INF: i32 = 256;
    const MINF: i32 = -1;

    fn source(&mut self) -> PixelIndex {
        self.mask[0] = 1;
        PixelIndex { x: 0, y: 0 }
    }

    fn value(&self, node: PixelIndex) -> i32 {
        i32::from(self.image.get(node.x as usize, node.y as usize))
    }

    fn next_neighbor(&mut self, node: PixelIndex) -> Option<PixelIndex> {
        let index = self.mask_index(node);
        debug_assert!(self.mask[index] > 0, "cursor advanced on an unreached pixel");
        while self.mask[index] < CURSOR_DONE {
            let (dx, dy) = OFFSETS[(self.mask[index] - 1) as usize];
            self.mask[index] += 1;
            let (x, y) = (node.x + dx, node.y + dy);
            if self.in_bounds(x, y) {
                let neighbor = PixelIndex { x, y };
                let neighbor_index = self.mask_index(neighbor);
                if self.mask[neighbor_index] == 0 {
                    self.mask[neighbor_index] = 1;
                    return Some(neighbor);
                }
            }
        }
        None
    }
}

/// 256-bucket frontier: `push` files a pixel under its grey level, `pop`
/// takes from the extreme non-empty bucket, LIFO within a bucket.
pub struct BucketFrontier {
    buckets: Vec<Vec<PixelIndex>>,
    cursor: usize,
    inverted: bool,
}

impl BucketFrontier {
    pub fn new(inverted: bool) -> Self {
        Self {
            buckets: (0..256).map(|_| Vec::new()).collect(),
            cursor: if inverted { 0 } else { 255 },
            inverted,
        }
    }
}

impl PriorityFrontier for BucketFrontier {
    type NodeIndex = PixelIndex;
    type Value = i32;

    fn push(&mut self, node: PixelIndex, value: i32) {
        debug_assert!((0..256).contains(&value), "value out of range: {value}");
        let bucket = value as usize;
        self.buckets[bucket].push(node);
        self.cursor = if self.inverted {
            self.cursor.max(bucket)
        } else {
            self.cursor.min(bucket)
        };
    }

    fn pop(&mut self) -> Option<PixelIndex> {
        let node = self.buckets[self.cursor].pop()?;
        if self.inverted {
            while self.cursor > 0 && self.buckets[self.cursor].is_empty() {
                self.cursor -= 1;
            }
        } else {
            while self.cursor < 255 && self.buckets[self.cursor].is_empty() {
                self.cursor += 1;
            }
        }
        Some(node)
    }
}
