//! Error types for the `framegrab` crate.
//!
//! This module defines [`FramegrabError`], the unified error type returned by
//! all fallible operations in the crate. Variants carry the offending path or
//! the external tool's diagnostic so callers rarely need extra logging.
//!
//! The variants fall into the two classes the pipeline distinguishes:
//! configuration/precondition errors that abort a run (bad intervals, missing
//! mode flags, missing directories), and external-tool errors that fail a
//! single task while the batch continues.

use std::{io::Error as IoError, path::PathBuf};

use thiserror::Error;

/// The unified error type for all `framegrab` operations.
///
/// Every public method that can fail returns `Result<T, FramegrabError>`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FramegrabError {
    /// The input media path does not resolve to an existing regular file.
    #[error("Media file not found: {path}")]
    MediaNotFound {
        /// Path that was passed to [`crate::ExtractionTask::create`].
        path: PathBuf,
    },

    /// A path that must be an existing directory is not one.
    #[error("Not a directory: {path}")]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// A frame or time interval of zero was provided.
    #[error("Interval must be greater than zero")]
    InvalidInterval,

    /// No extraction mode flag was selected.
    #[error(
        "No extraction mode selected (use exactly one of --frame-interval, --time-interval, --extract-all)"
    )]
    NoModeSelected,

    /// More than one extraction mode flag was selected.
    #[error("Multiple extraction modes selected: {names:?} (use exactly one)")]
    AmbiguousMode {
        /// The mode names that were simultaneously active.
        names: Vec<&'static str>,
    },

    /// The image format string is not in the supported set.
    #[error("Unsupported image format: {0} (expected png, jpg, or bmp)")]
    UnsupportedImageFormat(String),

    /// An external tool binary could not be launched.
    #[error("External tool not found in PATH: {tool}")]
    ToolNotFound {
        /// The binary name (`ffmpeg` or `ffprobe`).
        tool: &'static str,
    },

    /// The frame-rate probe failed or produced an unparseable reply.
    ///
    /// Task construction downgrades this to an unknown frame rate rather
    /// than propagating it; it only surfaces from
    /// [`crate::probe::video_frame_rate`] directly.
    #[error("Frame rate probe failed for {path}: {reason}")]
    ProbeFailed {
        /// The media file that was probed.
        path: PathBuf,
        /// What went wrong (spawn failure, decode failure, parse failure).
        reason: String,
    },

    /// The external extraction process exited with a non-zero status.
    #[error("ffmpeg failed for {media}: {reason}")]
    ExtractionFailed {
        /// The media file being extracted.
        media: PathBuf,
        /// Exit status or spawn diagnostic.
        reason: String,
    },

    /// An I/O error occurred while walking, creating, or renaming files.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),
}
