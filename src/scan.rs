//! Input discovery.
//!
//! Lists the regular files directly inside the input directory (no
//! recursion, hidden files skipped) and splits them by extension into the
//! images that will be processed and the files that are dropped.
//!
//! ```text
//! input/
//! ├── 01.png        → accepted
//! ├── holiday.JPG   → accepted (extensions compare case-insensitively)
//! ├── notes.txt     → rejected
//! ├── .DS_Store     → ignored
//! └── nested/       → ignored
//! ```
//!
//! Explicit file lists from the command line go through [`filter_files`] so
//! they get the same extension check.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to read input directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Input directory not found: {}", .0.display())]
    MissingInput(PathBuf),
}

/// Files found in the input, split by extension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanResult {
    /// Files with an accepted extension, sorted by path.
    pub accepted: Vec<PathBuf>,
    /// Files dropped for an unrecognized extension, sorted by path.
    pub rejected: Vec<PathBuf>,
}

/// Scan `input_dir` for files whose extension is in `extensions`.
pub fn scan(input_dir: &Path, extensions: &[String]) -> Result<ScanResult, ScanError> {
    if !input_dir.is_dir() {
        return Err(ScanError::MissingInput(input_dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if entry.file_type().is_file() && !hidden {
            files.push(entry.into_path());
        }
    }

    Ok(filter_files(files, extensions))
}

/// Split `files` by extension, keeping their relative order.
pub fn filter_files(
    files: impl IntoIterator<Item = PathBuf>,
    extensions: &[String],
) -> ScanResult {
    let (accepted, rejected): (Vec<PathBuf>, Vec<PathBuf>) = files
        .into_iter()
        .partition(|path| has_extension(path, extensions));
    ScanResult { accepted, rejected }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension() else {
        return false;
    };
    let ext = ext.to_string_lossy();
    extensions
        .iter()
        .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(&ext))
}
