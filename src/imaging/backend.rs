//! Image codec backend trait and shared error type.
//!
//! The [`ImageBackend`] trait is the boundary between the pixel engine and
//! the file system: it loads a file into a normalized
//! [`PixelBuffer`](super::PixelBuffer) and saves one back. The production
//! implementation is [`RustBackend`](super::rust_backend::RustBackend); tests
//! use the in-memory `MockBackend` below.

use super::buffer::PixelBuffer;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {0}")]
    Decode(String),
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),
    #[error("Failed to encode {0}")]
    Encode(String),
    /// Another input of the same batch already maps to this output file.
    #[error("{} is already written by input #{:0>3}", .output.display(), .first + 1)]
    OutputCollision { output: PathBuf, first: usize },
}

/// Trait for image codec backends.
///
/// Must be `Sync`: one backend is shared by every batch worker.
pub trait ImageBackend: Sync {
    /// Decode the file at `path` and normalize it to the canonical layout.
    fn load(&self, path: &Path) -> Result<PixelBuffer, BackendError>;

    /// Encode `buffer` to `path`. The format follows the path's extension.
    fn save(&self, buffer: &PixelBuffer, path: &Path) -> Result<(), BackendError>;
}
