//! Channel-averaging greyscale conversion.
//!
//! Each pixel's three color channels are replaced by their integer (floor)
//! average; alpha is left alone. There is no luminance weighting.

use super::buffer::{ALPHA, PixelBuffer};

/// Floor average of the three color channels of one pixel.
#[inline]
pub fn channel_average(pixel: &[u8]) -> u8 {
    ((pixel[0] as u16 + pixel[1] as u16 + pixel[2] as u16) / 3) as u8
}

/// Convert `buffer` to greyscale in place.
pub fn greyscale_in_place(buffer: &mut PixelBuffer) {
    for pixel in buffer.pixels_mut() {
        let avg = channel_average(pixel);
        pixel[..ALPHA].fill(avg);
    }
}

/// Consuming form of [`greyscale_in_place`].
pub fn convert_to_greyscale(mut buffer: PixelBuffer) -> PixelBuffer {
    greyscale_in_place(&mut buffer);
    buffer
}
