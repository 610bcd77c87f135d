//! Borrowed grayscale input view.
//!
//! The detector consumes externally owned 8-bit buffers; `ImageU8` borrows
//! them without copying. Row strides wider than the image are allowed so
//! callers can hand in sub-views of larger frames.

/// Read-only view over an 8-bit grayscale buffer with an explicit row stride.
#[derive(Clone, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // samples between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// View over a contiguous `w * h` buffer.
    pub fn from_slice(data: &'a [u8], w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }

    /// Iterates the payload rows, skipping any stride padding.
    pub fn rows(&self) -> impl Iterator<Item = &'a [u8]> {
        let (w, stride, data) = (self.w, self.stride, self.data);
        (0..self.h).map(move |y| &data[y * stride..y * stride + w])
    }
}
