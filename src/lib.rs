//! # greyedge
//!
//! Batch conversion of raster images to greyscale or to a Sobel edge map.
//! Point it at a directory, pick a transform, and every image is written to
//! the output directory as `<name>_Greyscale.png` or `<name>_Sobel.png`.
//!
//! # Architecture
//!
//! ```text
//! file ─ decode ─▶ normalize ─▶ PixelBuffer ─┬─ greyscale (in place) ──────────────┬─▶ encode ─ file
//!                                            └─ grid ─▶ sobel ─▶ grid ─▶ buffer ──┘
//! ```
//!
//! The pixel engine in [`imaging`] knows nothing about files: it works on
//! owned buffers in one canonical layout (4 bytes per pixel, 8 bits per
//! channel). Decoding, encoding, directory scanning, and the worker pool sit
//! around it and can each be tested on their own.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Pixel engine: buffer, grid, greyscale, Sobel, codec backend |
//! | [`process`] | Parallel batch over files with per-image failure isolation |
//! | [`scan`] | Input directory listing and extension filtering |
//! | [`naming`] | Output filename convention |
//! | [`config`] | `config.toml` loading, merging, and validation |
//! | [`output`] | CLI output formatting for scan, progress, and summary |
//!
//! # Design Decisions
//!
//! ## Channel Averaging
//!
//! Greyscale is the integer average of the three color channels. No
//! luminance weighting, no gamma. Because the three channels are treated
//! symmetrically their order (RGB or BGR) never matters, and alpha is
//! always carried through untouched.
//!
//! ## Grid for Neighborhood Access
//!
//! Edge detection reads a 3×3 neighborhood around every pixel. Rather than
//! stride arithmetic on the packed buffer, the buffer is converted to a
//! [`PixelGrid`](imaging::PixelGrid) indexed by `(x, y)`. The conversion is
//! lossless in both directions.
//!
//! ## Border Pixels Stay Black
//!
//! Sobel output is only computed for interior pixels. The one-pixel frame
//! around the image is left at `(0, 0, 0, 0)`: transparent black. This keeps
//! output identical to earlier releases; see [`imaging::sobel`].
//!
//! ## Two Levels of Parallelism, One Pool
//!
//! A batch runs one task per image on a rayon pool sized to the processor
//! count (or `--jobs`). Sobel additionally fans its rows out on the same
//! pool. Neither level shares mutable state, so no locks are involved.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod process;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
