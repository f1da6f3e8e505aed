//! Batch processing across files.
//!
//! Takes a list of source images and one [`Transform`], and runs the
//! transform on every image in parallel:
//!
//! ```text
//! source file → backend.load → transform.apply → backend.save → <stem><suffix>.png
//! ```
//!
//! ## Parallel Processing
//!
//! Each batch builds its own [rayon](https://docs.rs/rayon) pool sized by
//! [`BatchOptions::workers`]. Images are the unit of work; the Sobel
//! transform additionally splits each image by rows on the same pool.
//! Workers share nothing mutable except a completion counter and the event
//! channel.
//!
//! ## Failure Isolation
//!
//! A failing image (unreadable, undecodable, unwritable) becomes an
//! [`ImageOutcome`] carrying the error. Sibling images are unaffected and the
//! batch itself only fails for setup problems (output directory, thread
//! pool). Threshold validation happens earlier, when the [`Threshold`] is
//! built, so a bad threshold never starts a batch.
//!
//! ## Output Collisions
//!
//! Output paths are reserved before any worker starts. When two inputs share
//! a stem (`a.png`, `a.jpg`) the first in input order owns the output file and
//! every later one fails with [`BackendError::OutputCollision`] without being
//! decoded, so no two workers ever write the same file.
//!
//! [`Threshold`]: crate::imaging::Threshold

use crate::imaging::{BackendError, ImageBackend, RustBackend, Transform};
use crate::naming::output_path;
use rayon::prelude::*;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Where results go and how many images run at once.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub output_dir: PathBuf,
    pub workers: usize,
}

/// Progress notifications sent while a batch runs.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEvent {
    /// An image was decoded and its transform is about to run.
    ImageStarted {
        index: usize,
        source: PathBuf,
        width: u32,
        height: u32,
    },
    /// An image was written. `completed` counts finished images (ok or failed).
    ImageFinished {
        index: usize,
        output: PathBuf,
        elapsed: Duration,
        completed: usize,
        total: usize,
    },
    ImageFailed {
        index: usize,
        source: PathBuf,
        error: String,
        completed: usize,
        total: usize,
    },
}

/// Result for one source image.
#[derive(Debug, Serialize)]
pub struct ImageOutcome {
    /// Position in the input list.
    pub index: usize,
    pub source: PathBuf,
    /// Output path on success.
    #[serde(serialize_with = "serialize_result")]
    pub result: Result<PathBuf, BackendError>,
}

/// Everything a finished batch reports.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub transform: Transform,
    /// One entry per input, in input order.
    pub outcomes: Vec<ImageOutcome>,
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &BackendError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.source.as_path(), e)))
    }
}

fn serialize_result<S: Serializer>(
    result: &Result<PathBuf, BackendError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(1))?;
    match result {
        Ok(output) => map.serialize_entry("output", output)?,
        Err(e) => map.serialize_entry("error", &e.to_string())?,
    }
    map.end()
}

/// Run `transform` over `files` with the `image`-crate backend.
pub fn process(
    files: &[PathBuf],
    transform: Transform,
    options: &BatchOptions,
    events: Option<Sender<ProcessEvent>>,
) -> Result<BatchReport, BatchError> {
    process_with_backend(&RustBackend::new(), files, transform, options, events)
}

/// Run a batch using a specific backend (allows testing with mock).
pub fn process_with_backend(
    backend: &impl ImageBackend,
    files: &[PathBuf],
    transform: Transform,
    options: &BatchOptions,
    events: Option<Sender<ProcessEvent>>,
) -> Result<BatchReport, BatchError> {
    std::fs::create_dir_all(&options.output_dir)?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.workers.max(1))
        .build()?;

    let start = Instant::now();
    let total = files.len();
    let completed = AtomicUsize::new(0);
    let events = events.as_ref();
    let targets = plan_outputs(files, transform, &options.output_dir);

    let outcomes: Vec<ImageOutcome> = pool.install(|| {
        files
            .par_iter()
            .zip(targets)
            .enumerate()
            .map(|(index, (source, target))| {
                let image_start = Instant::now();
                let result = target.and_then(|output| {
                    process_image(backend, index, source, transform, output, events)
                });
                let completed = completed.fetch_add(1, Ordering::Relaxed) + 1;

                let event = match &result {
                    Ok(output) => ProcessEvent::ImageFinished {
                        index,
                        output: output.clone(),
                        elapsed: image_start.elapsed(),
                        completed,
                        total,
                    },
                    Err(e) => ProcessEvent::ImageFailed {
                        index,
                        source: source.clone(),
                        error: e.to_string(),
                        completed,
                        total,
                    },
                };
                emit(events, event);

                ImageOutcome {
                    index,
                    source: source.clone(),
                    result,
                }
            })
            .collect()
    });

    Ok(BatchReport {
        transform,
        outcomes,
        elapsed: start.elapsed(),
    })
}

/// Output path for each input, in input order. An input whose path was
/// already claimed gets a collision error naming the first claimant.
fn plan_outputs(
    files: &[PathBuf],
    transform: Transform,
    output_dir: &Path,
) -> Vec<Result<PathBuf, BackendError>> {
    let mut owners: HashMap<PathBuf, usize> = HashMap::new();
    files
        .iter()
        .enumerate()
        .map(|(index, source)| {
            let output = output_path(output_dir, source, transform.suffix());
            match owners.get(&output) {
                Some(&first) => Err(BackendError::OutputCollision { output, first }),
                None => {
                    owners.insert(output.clone(), index);
                    Ok(output)
                }
            }
        })
        .collect()
}

fn process_image(
    backend: &impl ImageBackend,
    index: usize,
    source: &Path,
    transform: Transform,
    output: PathBuf,
    events: Option<&Sender<ProcessEvent>>,
) -> Result<PathBuf, BackendError> {
    let buffer = backend.load(source)?;
    emit(
        events,
        ProcessEvent::ImageStarted {
            index,
            source: source.to_path_buf(),
            width: buffer.width(),
            height: buffer.height(),
        },
    );

    let result = transform.apply(buffer);
    backend.save(&result, &output)?;
    Ok(output)
}

fn emit(events: Option<&Sender<ProcessEvent>>, event: ProcessEvent) {
    if let Some(tx) = events {
        // Receiver gone means nobody is listening; the batch carries on.
        let _ = tx.send(event);
    }
}
