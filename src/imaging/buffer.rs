//! Packed pixel buffer in the canonical 4-channel layout.
//!
//! Every pixel occupies four consecutive bytes `[c0, c1, c2, alpha]`. The
//! three color channels are some permutation of red/green/blue; the engine
//! never tells them apart because every algorithm only looks at their
//! average. Whatever order the decoder produced is the order that gets
//! encoded again.
//!
//! A [`PixelBuffer`] cannot exist with a length other than
//! `width * height * 4`: the only constructors either allocate that exact
//! size or refuse raw data of the wrong length.

/// Bytes per pixel in the canonical layout.
pub const CHANNELS: usize = 4;

/// Index of the alpha byte within a pixel.
pub const ALPHA: usize = 3;

/// An image stored as one flat, row-major byte sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a zeroed (fully transparent black) buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; byte_len(width, height)],
        }
    }

    /// Wrap raw bytes, returning `None` if the length is not exactly
    /// `width * height * 4`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        (data.len() == byte_len(width, height)).then_some(Self {
            width,
            height,
            data,
        })
    }

    /// Build a buffer by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(byte_len(width, height));
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The 4 bytes of the pixel at column `x`, row `y`.
    ///
    /// Panics if the coordinates are outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + ALPHA],
        ]
    }

    /// Iterate over pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(CHANNELS)
    }

    /// Iterate mutably over pixels in row-major order.
    pub fn pixels_mut(&mut self) -> impl Iterator<Item = &mut [u8]> {
        self.data.chunks_exact_mut(CHANNELS)
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} image",
            self.width,
            self.height
        );
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }
}

fn byte_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * CHANNELS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_zeroed_with_exact_length() {
        let buf = PixelBuffer::new(3, 2);
        assert_eq!(buf.as_bytes().len(), 24);
        assert!(buf.as_bytes().iter().all(|&b| b == 0));
        assert_eq!(buf.pixels().count(), 6);
    }

    #[test]
    fn from_raw_rejects_partial_pixels() {
        assert!(PixelBuffer::from_raw(2, 2, vec![0; 15]).is_none());
        assert!(PixelBuffer::from_raw(2, 2, vec![0; 17]).is_none());
        assert!(PixelBuffer::from_raw(2, 2, vec![0; 16]).is_some());
    }

    #[test]
    fn zero_area_has_no_bytes() {
        let buf = PixelBuffer::new(0, 7);
        assert!(buf.as_bytes().is_empty());
        assert_eq!(buf.pixels().count(), 0);
    }

    #[test]
    fn from_fn_is_row_major() {
        let buf = PixelBuffer::from_fn(2, 2, |x, y| [x as u8, y as u8, 0, 255]);
        assert_eq!(buf.as_bytes()[..8], [0, 0, 0, 255, 1, 0, 0, 255]);
        assert_eq!(buf.pixel(0, 1), [0, 1, 0, 255]);
        assert_eq!(buf.pixel(1, 1), [1, 1, 0, 255]);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn pixel_out_of_bounds_panics() {
        PixelBuffer::new(2, 2).pixel(2, 0);
    }
}
