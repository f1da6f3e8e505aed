//! Conversion of decoded images into the canonical [`PixelBuffer`] layout.
//!
//! | Decoded as | Result |
//! |---|---|
//! | 8-bit RGBA | bytes taken over as-is, no copy |
//! | grey, grey+alpha, RGB | expanded to RGBA, alpha = 255 where absent |
//! | 16-bit / float | scaled down to 8 bits per channel |

use super::buffer::PixelBuffer;
use image::{DynamicImage, RgbaImage};

/// Normalize a decoded image into a [`PixelBuffer`].
pub fn normalize(image: DynamicImage) -> PixelBuffer {
    let rgba = match image {
        DynamicImage::ImageRgba8(rgba) => rgba,
        other => other.to_rgba8(),
    };
    from_rgba(rgba)
}

fn from_rgba(rgba: RgbaImage) -> PixelBuffer {
    let (width, height) = rgba.dimensions();
    PixelBuffer::from_raw(width, height, rgba.into_raw())
        .expect("RgbaImage always holds width * height * 4 bytes")
}
