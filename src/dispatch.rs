//! Batch dispatcher.
//!
//! [`run_batch`] is the single entry point the CLI drives: walk the inputs,
//! build one [`ExtractionTask`] per media file, plan each task with the
//! resolved [`ExtractionMode`], and execute every plan strictly in order —
//! one blocking ffmpeg run, then its correction pass, then the next task.
//! Nothing runs concurrently and nothing is cancelled mid-flight.
//!
//! Per-task failures are soft: a task with an unknown frame rate is
//! skipped, a failed ffmpeg run is logged and counted, and the batch
//! continues. Only configuration errors (a zero interval, an unreadable
//! media file at task construction) and a missing ffmpeg binary abort the
//! whole run.

use std::path::{Path, PathBuf};

use crate::error::FramegrabError;
use crate::format::ImageFormat;
use crate::mode::ExtractionMode;
use crate::task::ExtractionTask;
use crate::walker::MediaWalker;

/// Outcome counts for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Tasks whose extraction and correction both completed.
    pub extracted: usize,
    /// Tasks skipped before extraction (unknown frame rate).
    pub skipped: usize,
    /// Tasks whose ffmpeg run or correction pass failed.
    pub failed: usize,
}

impl BatchSummary {
    /// Total number of tasks the batch attempted.
    pub fn total(&self) -> usize {
        self.extracted + self.skipped + self.failed
    }
}

/// Per-task progress notification.
#[derive(Debug)]
pub struct TaskProgress<'a> {
    /// Zero-based index of the task within the batch.
    pub index: usize,
    /// Total number of tasks in the batch.
    pub total: usize,
    /// The media file the task extracts from.
    pub media: &'a Path,
}

/// Observer for batch progress.
///
/// Implementations must be cheap; the callback fires once per task, before
/// the task's ffmpeg run starts.
pub trait ProgressCallback {
    /// Called before each task is executed.
    fn on_task(&self, progress: &TaskProgress<'_>);
}

/// Default observer that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_task(&self, _progress: &TaskProgress<'_>) {}
}

/// Run a full extraction batch.
///
/// Builds tasks for every media file the walker yields, then executes each
/// task's plan sequentially. See the module docs for the failure taxonomy.
///
/// # Errors
///
/// Task construction errors, a zero interval, and a missing `ffmpeg`
/// binary are fatal; everything else is counted in the returned
/// [`BatchSummary`].
pub fn run_batch(
    inputs: Vec<PathBuf>,
    output_root: Option<PathBuf>,
    recursive: bool,
    mode: ExtractionMode,
    format: ImageFormat,
    progress: &dyn ProgressCallback,
) -> Result<BatchSummary, FramegrabError> {
    let walker = MediaWalker::new(inputs, output_root, recursive);

    let mut tasks = Vec::new();
    for entry in walker {
        tasks.push(ExtractionTask::create(entry.media, &entry.output_dir, format)?);
    }

    log::debug!("Dispatching {} task(s) in {} mode", tasks.len(), mode.name());

    let total = tasks.len();
    let mut summary = BatchSummary::default();

    for (index, task) in tasks.iter().enumerate() {
        progress.on_task(&TaskProgress {
            index,
            total,
            media: task.media(),
        });

        let Some(plan) = mode.plan(task)? else {
            summary.skipped += 1;
            continue;
        };

        match plan.execute() {
            Ok(renamed) => {
                log::debug!(
                    "{}: extracted and corrected {renamed} frame(s)",
                    task.media().display()
                );
                summary.extracted += 1;
            }
            Err(error @ FramegrabError::ToolNotFound { .. }) => {
                // Every remaining task would fail the same way.
                return Err(error);
            }
            Err(error) => {
                log::error!("{error}");
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}
