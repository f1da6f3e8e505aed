//! Pixel engine: pure Rust, no system libraries.
//!
//! | Stage | Module |
//! |---|---|
//! | **Packed buffer** | [`buffer`]: `PixelBuffer`, 4 bytes per pixel |
//! | **Normalize** | [`normalize`]: any decoded image → RGBA8 buffer |
//! | **Greyscale** | [`greyscale`]: floor average of the color channels |
//! | **Grid** | [`grid`]: buffer ⇄ `(x, y)`-indexed cells |
//! | **Edges** | [`sobel`]: thresholded Sobel magnitude, rows in parallel |
//!
//! The module is split into:
//! - **Core**: buffer, grid, greyscale and Sobel (no I/O, unit testable)
//! - **Parameters**: [`Threshold`] and [`Transform`]
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`] for decode/encode

pub mod backend;
pub mod buffer;
pub mod greyscale;
pub mod grid;
pub mod normalize;
mod params;
pub mod rust_backend;
pub mod sobel;

pub use backend::{BackendError, ImageBackend};
pub use buffer::PixelBuffer;
pub use greyscale::{convert_to_greyscale, greyscale_in_place};
pub use grid::{PixelGrid, buffer_to_grid, grid_to_buffer};
pub use normalize::normalize;
pub use params::{RangeError, Threshold, Transform};
pub use rust_backend::{RustBackend, supported_input_extensions};
pub use sobel::detect_edges;
