//! Sobel edge detection with per-component thresholding.
//!
//! For every interior pixel the 3×3 neighborhood is reduced to greyscale by
//! the same floor average used in [`greyscale`](super::greyscale), then
//! convolved with the two kernels below (indexed `[dy + 1][dx + 1]`).
//!
//! ```text
//! Gx = [-1 0 1]    Gy = [ 1  2  1]
//!      [-2 0 2]         [ 0  0  0]
//!      [-1 0 1]         [-1 -2 -1]
//! ```
//!
//! Each signed component is zeroed when it is below the threshold *before*
//! the two are combined, so negative responses never survive. A lone bright
//! pixel therefore lights its left and lower neighbors but not its right and
//! upper ones, even at threshold 0. The magnitude
//! `sqrt(gx² + gy²)` is clamped to 255 and truncated into the three color
//! channels; alpha is copied from the input pixel.
//!
//! ## Border
//!
//! The outermost ring of pixels is not computed. Those output cells keep
//! their zero initialization and come out as `(0, 0, 0, 0)`. Images with
//! fewer than three columns or rows have no interior and produce an
//! all-zero grid.
//!
//! ## Parallelism
//!
//! Output rows are independent: row `y` reads input rows `y - 1..=y + 1`
//! and writes only itself. Rows are distributed over the current rayon pool
//! with `par_chunks_mut`; the input grid is shared read-only.

use super::buffer::ALPHA;
use super::greyscale::channel_average;
use super::grid::PixelGrid;
use super::params::Threshold;
use rayon::prelude::*;

type Kernel3 = [[i32; 3]; 3];

pub const SOBEL_X: Kernel3 = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
pub const SOBEL_Y: Kernel3 = [[1, 2, 1], [0, 0, 0], [-1, -2, -1]];

/// Compute the thresholded gradient-magnitude map of `input`.
pub fn detect_edges(input: &PixelGrid, threshold: Threshold) -> PixelGrid {
    let (w, h) = (input.width(), input.height());
    let mut output = PixelGrid::new(w, h);
    if w < 3 || h < 3 {
        return output;
    }

    let stride = w as usize;
    let interior = &mut output.cells_mut()[stride..(h as usize - 1) * stride];
    interior
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(i, row)| edge_row(input, i as u32 + 1, threshold.value(), row));

    output
}

/// Fill interior cells of output row `y`.
fn edge_row(input: &PixelGrid, y: u32, threshold: i32, out: &mut [[u8; 4]]) {
    for x in 1..input.width() - 1 {
        let (gx, gy) = gradient_at(input, x, y);
        let gx = if gx < threshold { 0 } else { gx };
        let gy = if gy < threshold { 0 } else { gy };

        let mag = ((gx * gx + gy * gy) as f64).sqrt().min(255.0) as u8;
        let alpha = input[(x, y)][ALPHA];
        out[x as usize] = [mag, mag, mag, alpha];
    }
}

/// Raw Sobel responses at an interior pixel.
fn gradient_at(input: &PixelGrid, x: u32, y: u32) -> (i32, i32) {
    let mut gx = 0;
    let mut gy = 0;
    for ky in 0..3 {
        for kx in 0..3 {
            let cell = &input[(x + kx - 1, y + ky - 1)];
            let avg = channel_average(cell) as i32;
            gx += avg * SOBEL_X[ky as usize][kx as usize];
            gy += avg * SOBEL_Y[ky as usize][kx as usize];
        }
    }
    (gx, gy)
}
