//! 2D-indexable pixel grid used by the edge detector.
//!
//! A [`PixelGrid`] holds one independent `[u8; 4]` cell per pixel and is
//! indexed by `(x, y)`, `x` being the column and `y` the row, so neighbor
//! lookups read as `grid[(x - 1, y + 1)]` instead of stride arithmetic on
//! the packed buffer. Cells are stored row-major, which lets the detector
//! hand whole output rows to separate workers.

use super::buffer::{CHANNELS, PixelBuffer};
use std::ops::{Index, IndexMut};

/// Per-pixel channel groups of a [`PixelBuffer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    cells: Vec<[u8; 4]>,
}

impl PixelGrid {
    /// Allocate a grid of zeroed (transparent black) cells.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![[0; 4]; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major cell storage.
    pub(crate) fn cells_mut(&mut self) -> &mut [[u8; 4]] {
        &mut self.cells
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }
}

impl Index<(u32, u32)> for PixelGrid {
    type Output = [u8; 4];

    fn index(&self, (x, y): (u32, u32)) -> &[u8; 4] {
        &self.cells[self.offset(x, y)]
    }
}

impl IndexMut<(u32, u32)> for PixelGrid {
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut [u8; 4] {
        let i = self.offset(x, y);
        &mut self.cells[i]
    }
}

/// Split a packed buffer into a grid. The buffer is consumed.
pub fn buffer_to_grid(buffer: PixelBuffer) -> PixelGrid {
    let cells = buffer
        .pixels()
        .map(|p| [p[0], p[1], p[2], p[3]])
        .collect();
    PixelGrid {
        width: buffer.width(),
        height: buffer.height(),
        cells,
    }
}

/// Pack a grid back into a freshly allocated buffer.
pub fn grid_to_buffer(grid: PixelGrid) -> PixelBuffer {
    let mut data = Vec::with_capacity(grid.cells.len() * CHANNELS);
    for cell in &grid.cells {
        data.extend_from_slice(cell);
    }
    PixelBuffer::from_raw(grid.width, grid.height, data)
        .expect("grid cell count matches its dimensions")
}
