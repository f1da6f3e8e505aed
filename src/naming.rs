//! Output filename derivation.
//!
//! Every processed image is written next to its siblings in the output
//! directory as `<source stem><transform suffix>.png`:
//! - `input/cat.jpg` + greyscale → `cat_Greyscale.png`
//! - `input/cat.jpg` + sobel → `cat_Sobel.png`
//! - `input/archive.tar.png` + sobel → `archive.tar_Sobel.png`
//!
//! Output is always PNG regardless of the input container: it is lossless
//! and keeps the alpha channel the engine preserves.

use std::path::{Path, PathBuf};

/// Extension of every written file.
pub const OUTPUT_EXTENSION: &str = "png";

/// Stem used when the source path has none (e.g. `..`).
const FALLBACK_STEM: &str = "image";

/// Build the output filename for `source` with `suffix` (e.g. `_Sobel`).
pub fn output_file_name(source: &Path, suffix: &str) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy())
        .filter(|s| !s.is_empty())
        .unwrap_or(FALLBACK_STEM.into());
    format!("{stem}{suffix}.{OUTPUT_EXTENSION}")
}

/// Full output path for `source` inside `output_dir`.
pub fn output_path(output_dir: &Path, source: &Path, suffix: &str) -> PathBuf {
    output_dir.join(output_file_name(source, suffix))
}
