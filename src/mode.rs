//! Extraction modes.
//!
//! [`ExtractionMode`] is the closed set of ways a batch can sample frames:
//! every nth frame, one frame per fixed time window, or everything.
//! Resolving the single active mode from the CLI flags is an explicit,
//! checkable step.
//!
//! Planning a task produces a [`TaskPlan`]: exactly one ffmpeg invocation
//! plus exactly one correction step, executed strictly in that order. A
//! task whose frame rate could not be probed is not planned at all — the
//! mode logs a diagnostic and the dispatcher counts the task as skipped.

use std::path::PathBuf;

use uuid::Uuid;

use crate::correct::correct_filenames;
use crate::error::FramegrabError;
use crate::ffmpeg::FfmpegInvocation;
use crate::task::ExtractionTask;

/// The extraction sampling mode for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
    /// Keep every nth source frame (`frame index mod n == 0`).
    FrameInterval(u64),
    /// Keep one frame per time window, in whole milliseconds.
    TimeInterval(u64),
    /// Keep every frame. Equivalent to `FrameInterval(1)`.
    ExtractAll,
}

impl ExtractionMode {
    /// The mode's CLI-facing name.
    pub fn name(&self) -> &'static str {
        match self {
            ExtractionMode::FrameInterval(_) => "frame_interval",
            ExtractionMode::TimeInterval(_) => "time_interval",
            ExtractionMode::ExtractAll => "extract_all",
        }
    }

    /// Resolve exactly one active mode from the parsed CLI flags.
    ///
    /// # Errors
    ///
    /// [`FramegrabError::NoModeSelected`] if no flag is set,
    /// [`FramegrabError::AmbiguousMode`] if more than one is.
    pub fn resolve(
        frame_interval: Option<u64>,
        time_interval_ms: Option<u64>,
        extract_all: bool,
    ) -> Result<Self, FramegrabError> {
        let mut selected = Vec::new();
        if let Some(n) = frame_interval {
            selected.push(ExtractionMode::FrameInterval(n));
        }
        if let Some(ms) = time_interval_ms {
            selected.push(ExtractionMode::TimeInterval(ms));
        }
        if extract_all {
            selected.push(ExtractionMode::ExtractAll);
        }

        match selected.len() {
            0 => Err(FramegrabError::NoModeSelected),
            1 => Ok(selected[0]),
            _ => Err(FramegrabError::AmbiguousMode {
                names: selected.iter().map(ExtractionMode::name).collect(),
            }),
        }
    }

    /// The sampling interval this mode runs with.
    pub fn interval(&self) -> u64 {
        match self {
            ExtractionMode::FrameInterval(n) => *n,
            ExtractionMode::TimeInterval(ms) => *ms,
            ExtractionMode::ExtractAll => 1,
        }
    }

    /// Build the plan for one task: the ffmpeg invocation and the
    /// correction step that follows it.
    ///
    /// Returns `Ok(None)` — with a logged diagnostic — when the task's
    /// frame rate is unknown; such a task contributes no output.
    ///
    /// # Errors
    ///
    /// [`FramegrabError::InvalidInterval`] if the interval is zero.
    pub fn plan(&self, task: &ExtractionTask) -> Result<Option<TaskPlan>, FramegrabError> {
        let (interval, time_based) = match self {
            ExtractionMode::ExtractAll => return ExtractionMode::FrameInterval(1).plan(task),
            ExtractionMode::FrameInterval(n) => (*n, false),
            ExtractionMode::TimeInterval(ms) => (*ms, true),
        };

        if interval == 0 {
            return Err(FramegrabError::InvalidInterval);
        }

        let Some(frame_rate) = task.frame_rate() else {
            log::warn!(
                "Can't get frame rate from {}; no frames will be extracted",
                task.media().display()
            );
            return Ok(None);
        };

        let command = FfmpegInvocation::for_media(task.media().to_path_buf());
        let command = if time_based {
            // One frame per window of `interval` ms, with presentation
            // timestamps rewritten to the source's constant frame rate.
            let step = frame_rate * interval as f64 / 1000.0;
            command.flag(
                "-vf",
                format!("select=between(mod(n\\,{step})\\,0\\,0),setpts=N/{frame_rate}/TB"),
            )
        } else {
            command
                .flag("-vf", format!("select=not(mod(n\\,{interval}))"))
                .flag("-vsync", "vfr")
        };
        let command = command.arg(task.output_pattern().display().to_string());

        Ok(Some(TaskPlan {
            command,
            correction: CorrectionSpec {
                directory: task.output_dir().to_path_buf(),
                task_id: task.id(),
                interval,
                time_based,
            },
        }))
    }
}

/// The rename pass scheduled to run after a task's extraction command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionSpec {
    directory: PathBuf,
    task_id: Uuid,
    interval: u64,
    time_based: bool,
}

impl CorrectionSpec {
    /// Run the rename pass. Returns the number of files renamed.
    pub fn apply(&self) -> Result<usize, FramegrabError> {
        correct_filenames(&self.directory, self.task_id, self.interval, self.time_based)
    }

    /// The sampling interval the pass rewrites indices with.
    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// `true` for time-interval numbering (0-based milliseconds).
    pub fn is_time_based(&self) -> bool {
        self.time_based
    }
}

/// One task's ordered execution plan: extraction, then correction.
#[derive(Debug, Clone)]
pub struct TaskPlan {
    command: FfmpegInvocation,
    correction: CorrectionSpec,
}

impl TaskPlan {
    /// The assembled ffmpeg invocation, for inspection before running.
    pub fn command(&self) -> &FfmpegInvocation {
        &self.command
    }

    /// The correction step that follows the invocation.
    pub fn correction(&self) -> &CorrectionSpec {
        &self.correction
    }

    /// Run the extraction command, then the correction pass.
    ///
    /// The correction only runs if ffmpeg succeeded; a failed extraction
    /// surfaces as [`FramegrabError::ExtractionFailed`] instead of being
    /// silently "corrected" into an empty result. Returns the number of
    /// frames renamed.
    pub fn execute(&self) -> Result<usize, FramegrabError> {
        self.command.run()?;
        self.correction.apply()
    }
}
