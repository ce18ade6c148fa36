//! # framegrab
//!
//! Batch extraction of still frames from video files, delegating all frame
//! decoding and encoding to the external `ffmpeg` and `ffprobe` binaries.
//!
//! The crate contributes the plumbing around those tools: walking input
//! paths for media files, building per-file extraction tasks with
//! collision-free output names, assembling the ffmpeg command line for the
//! chosen sampling mode, and renaming ffmpeg's sequential outputs to
//! meaningful frame-index or elapsed-time filenames afterwards.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::PathBuf;
//!
//! use framegrab::{ExtractionMode, ImageFormat, NoOpProgress, run_batch};
//!
//! // Extract every 30th frame of every video under `recordings/`.
//! let summary = run_batch(
//!     vec![PathBuf::from("recordings")],
//!     Some(PathBuf::from("frames")),
//!     true,
//!     ExtractionMode::FrameInterval(30),
//!     ImageFormat::Png,
//!     &NoOpProgress,
//! ).unwrap();
//! println!("{} extracted, {} skipped", summary.extracted, summary.skipped);
//! ```
//!
//! ## Pipeline
//!
//! 1. [`MediaWalker`] yields `(media, output directory)` pairs from the
//!    input paths, mirroring subdirectory structure under the destination
//!    root.
//! 2. [`ExtractionTask::create`] builds one task per media file: a fresh
//!    UUID identifier, an output directory nested under the root, and a
//!    cached frame rate probed via `ffprobe`.
//! 3. [`ExtractionMode::plan`] turns a task into a [`TaskPlan`] — one
//!    ffmpeg invocation writing `<id>_1.png`, `<id>_2.png`, … plus one
//!    correction step.
//! 4. [`correct_filenames`] renames those outputs so the filename carries
//!    the true frame index (frame mode) or elapsed milliseconds (time
//!    mode). The identifier prefix scopes the pass to exactly the files
//!    this task produced.
//!
//! A companion pass, [`rebase_directory`], regroups extracted frame sets
//! by the capture timestamp embedded in their directory names.
//!
//! ## Requirements
//!
//! `ffmpeg` and `ffprobe` must be on `PATH`. No FFmpeg libraries are
//! linked; everything runs through the command-line tools.

pub mod correct;
pub mod dispatch;
pub mod error;
pub mod ffmpeg;
pub mod format;
pub mod mode;
pub mod probe;
pub mod rebase;
pub mod task;
pub mod walker;

pub use correct::{correct_filenames, natural_key};
pub use dispatch::{BatchSummary, NoOpProgress, ProgressCallback, TaskProgress, run_batch};
pub use error::FramegrabError;
pub use ffmpeg::FfmpegInvocation;
pub use format::{ImageFormat, MEDIA_EXTENSIONS, is_media_file};
pub use mode::{CorrectionSpec, ExtractionMode, TaskPlan};
pub use probe::video_frame_rate;
pub use rebase::{RebaseReport, rebase_directory};
pub use task::ExtractionTask;
pub use walker::{MediaEntry, MediaWalker};
