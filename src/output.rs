//! CLI output formatting.
//!
//! Each display has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Found 3 files in input/
//!     001 cat.jpg
//!     002 dog.png
//! Dropped (invalid file format)
//!     notes.txt
//! ```
//!
//! ## Process
//!
//! ```text
//! #001 cat.jpg (1920x1080)
//! #001 done → output/cat_Sobel.png (0.41s) [1/3]
//! #002 failed: notes.png: Failed to decode ... [2/3]
//!
//! Processed 2/3 images in 1.20s
//! ```

use crate::process::{BatchReport, ProcessEvent};
use crate::scan::ScanResult;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 0-based batch index as a 1-based, 3-digit zero-padded label.
fn format_index(index: usize) -> String {
    format!("#{:0>3}", index + 1)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn seconds(d: Duration) -> String {
    format!("{:.2}s", d.as_secs_f64())
}

// ============================================================================
// Scan output
// ============================================================================

/// Format the result of scanning the input directory.
pub fn format_scan_output(result: &ScanResult, input_dir: &Path) -> Vec<String> {
    let mut lines = vec![format!(
        "Found {} files in {}",
        result.accepted.len(),
        input_dir.display()
    )];
    for (i, path) in result.accepted.iter().enumerate() {
        lines.push(format!("    {:0>3} {}", i + 1, file_name(path)));
    }
    if !result.rejected.is_empty() {
        lines.push("Dropped (invalid file format)".to_string());
        for path in &result.rejected {
            lines.push(format!("    {}", file_name(path)));
        }
    }
    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(result: &ScanResult, input_dir: &Path) {
    for line in format_scan_output(result, input_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Process output
// ============================================================================

/// Format a single batch progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::ImageStarted {
            index,
            source,
            width,
            height,
        } => vec![format!(
            "{} {} ({}x{})",
            format_index(*index),
            file_name(source),
            width,
            height
        )],
        ProcessEvent::ImageFinished {
            index,
            output,
            elapsed,
            completed,
            total,
        } => vec![format!(
            "{} done \u{2192} {} ({}) [{}/{}]",
            format_index(*index),
            output.display(),
            seconds(*elapsed),
            completed,
            total
        )],
        ProcessEvent::ImageFailed {
            index,
            source,
            error,
            completed,
            total,
        } => vec![format!(
            "{} failed: {}: {} [{}/{}]",
            format_index(*index),
            file_name(source),
            error,
            completed,
            total
        )],
    }
}

/// Format the closing summary of a batch.
pub fn format_batch_summary(report: &BatchReport) -> Vec<String> {
    let total = report.outcomes.len();
    let mut lines = vec![
        String::new(),
        format!(
            "Processed {}/{} images in {}",
            report.succeeded(),
            total,
            seconds(report.elapsed)
        ),
    ];
    if report.failed() > 0 {
        lines.push(format!("Failed ({})", report.failed()));
        for (source, error) in report.failures() {
            lines.push(format!("    {}: {}", file_name(source), error));
        }
    }
    lines
}

/// Print the batch summary to stdout.
pub fn print_batch_summary(report: &BatchReport) {
    for line in format_batch_summary(report) {
        println!("{}", line);
    }
}
