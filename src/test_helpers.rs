//! Shared test utilities for the greyedge test suite.
//!
//! Synthetic buffers for the pixel engine and on-disk fixtures for the
//! backend, scanner and batch tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_png(&tmp.path().join("a.png"), &uniform_buffer(8, 8, [10, 20, 30, 255]));
//! write_corrupt(&tmp.path().join("b.png"));
//! ```

use std::path::Path;

use crate::imaging::PixelBuffer;

// =========================================================================
// Synthetic buffers
// =========================================================================

/// Every pixel set to `pixel`.
pub fn uniform_buffer(width: u32, height: u32, pixel: [u8; 4]) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, |_, _| pixel)
}

/// Opaque black `size`×`size` square with one white pixel at the center.
pub fn single_bright_pixel(size: u32) -> PixelBuffer {
    let c = size / 2;
    PixelBuffer::from_fn(size, size, |x, y| {
        if x == c && y == c {
            [255, 255, 255, 255]
        } else {
            [0, 0, 0, 255]
        }
    })
}

// =========================================================================
// On-disk fixtures
// =========================================================================

/// Encode `buffer` as a PNG at `path`, creating parent directories.
pub fn write_png(path: &Path, buffer: &PixelBuffer) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    image::save_buffer(
        path,
        buffer.as_bytes(),
        buffer.width(),
        buffer.height(),
        image::ExtendedColorType::Rgba8,
    )
    .unwrap();
}

/// Write bytes that no decoder accepts.
pub fn write_corrupt(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, b"this is definitely not an image").unwrap();
}

/// Create an empty file (content is irrelevant to the scanner).
pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, b"").unwrap();
}
