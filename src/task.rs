//! Per-media extraction task.
//!
//! An [`ExtractionTask`] is the unit of work the dispatcher drives: one
//! media file, one output directory, one freshly generated identifier. The
//! identifier is embedded in every frame filename ffmpeg produces for this
//! task, so the correction pass can select exactly this task's files even
//! when several tasks share an output directory.
//!
//! The frame rate is probed once at construction and cached. A failed probe
//! is not fatal here — the task records an unknown rate and the extraction
//! mode later declines to plan anything for it.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::FramegrabError;
use crate::format::ImageFormat;
use crate::probe;

/// One media file's extraction state.
///
/// Created per walker entry via [`ExtractionTask::create`], planned once by
/// an [`ExtractionMode`](crate::ExtractionMode), then discarded.
#[derive(Debug, Clone)]
pub struct ExtractionTask {
    id: Uuid,
    media: PathBuf,
    output_dir: PathBuf,
    format: ImageFormat,
    frame_rate: Option<f64>,
}

impl ExtractionTask {
    /// Construct a task for `media`, extracting into
    /// `output_root/<media stem>`.
    ///
    /// The output directory tree is created immediately (idempotent), and
    /// the media's frame rate is probed via `ffprobe`. A probe failure is
    /// downgraded to an unknown rate with a logged warning rather than
    /// failing construction.
    ///
    /// # Errors
    ///
    /// [`FramegrabError::MediaNotFound`] if `media` is not an existing
    /// regular file; an I/O error if the output directory cannot be
    /// created.
    pub fn create(
        media: PathBuf,
        output_root: &Path,
        format: ImageFormat,
    ) -> Result<Self, FramegrabError> {
        if !media.is_file() {
            return Err(FramegrabError::MediaNotFound { path: media });
        }

        let stem = media
            .file_stem()
            .ok_or_else(|| FramegrabError::MediaNotFound { path: media.clone() })?;
        let output_dir = output_root.join(stem);
        fs::create_dir_all(&output_dir)?;

        let frame_rate = match probe::video_frame_rate(&media) {
            Ok(rate) => Some(rate),
            Err(error) => {
                log::warn!("{error}");
                None
            }
        };

        let task = Self {
            id: Uuid::new_v4(),
            media,
            output_dir,
            format,
            frame_rate,
        };
        log::debug!("Created task {}", task.id);
        Ok(task)
    }

    /// Override the cached frame rate.
    ///
    /// Useful when the caller already knows the source rate and wants to
    /// skip or correct the probe.
    #[must_use]
    pub fn with_frame_rate(mut self, frame_rate: Option<f64>) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    /// The task identifier embedded in output filenames.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The source media file.
    pub fn media(&self) -> &Path {
        &self.media
    }

    /// The directory this task's frames are written into.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// The output image format.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// The probed frames-per-second value, or `None` if it could not be
    /// determined.
    pub fn frame_rate(&self) -> Option<f64> {
        self.frame_rate
    }

    /// The `%d`-sequenced output pattern handed to ffmpeg:
    /// `<output_dir>/<id>_%d.<ext>`.
    pub fn output_pattern(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}_%d.{}", self.id, self.format.extension()))
    }
}

impl Display for ExtractionTask {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "ExtractionTask:")?;
        writeln!(f, "  ID: {}", self.id)?;
        writeln!(f, "  MEDIA: {}", self.media.display())?;
        writeln!(f, "  OUTPUT_DIR: {}", self.output_dir.display())?;
        write!(f, "  IMAGE_FORMAT: {}", self.format)
    }
}
