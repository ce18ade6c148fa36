//! External `ffmpeg` process invocation.
//!
//! All decoding, seeking, and encoding work is delegated to the `ffmpeg`
//! binary on `PATH`; this module only assembles argument lists and runs the
//! process to completion. An invocation is built once by an extraction mode,
//! then executed exactly once by the dispatcher.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Command;

use crate::error::FramegrabError;

/// A fully assembled, not-yet-run `ffmpeg` command line.
///
/// The argument list is frozen at build time so it can be inspected (and
/// tested) without spawning anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfmpegInvocation {
    /// The media file named by `-i`, kept for error reporting.
    media: PathBuf,
    args: Vec<String>,
}

impl FfmpegInvocation {
    /// Start an invocation for `media` with the flags every extraction run
    /// shares: banner suppressed, ffmpeg's own logging reduced to errors,
    /// all cores, lossless output at maximum compression effort.
    pub fn for_media(media: PathBuf) -> Self {
        let args = vec![
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-i".to_string(),
            media.display().to_string(),
            "-threads".to_string(),
            "0".to_string(),
            "-crf".to_string(),
            "0".to_string(),
            "-preset".to_string(),
            "veryslow".to_string(),
        ];
        Self { media, args }
    }

    /// Append one argument.
    #[must_use]
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Append a flag and its value.
    #[must_use]
    pub fn flag(self, name: &str, value: impl Into<String>) -> Self {
        self.arg(name).arg(value)
    }

    /// The argument list as it will be passed to the process.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Run the invocation, blocking until ffmpeg exits.
    ///
    /// ffmpeg inherits stderr so its `-loglevel error` output reaches the
    /// terminal directly.
    ///
    /// # Errors
    ///
    /// [`FramegrabError::ToolNotFound`] if the binary cannot be launched,
    /// [`FramegrabError::ExtractionFailed`] if it exits non-zero.
    pub fn run(&self) -> Result<(), FramegrabError> {
        log::debug!("Running ffmpeg: {self}");

        let status = Command::new("ffmpeg")
            .args(&self.args)
            .status()
            .map_err(|error| {
                if error.kind() == ErrorKind::NotFound {
                    FramegrabError::ToolNotFound { tool: "ffmpeg" }
                } else {
                    FramegrabError::ExtractionFailed {
                        media: self.media.clone(),
                        reason: error.to_string(),
                    }
                }
            })?;

        if !status.success() {
            return Err(FramegrabError::ExtractionFailed {
                media: self.media.clone(),
                reason: status.to_string(),
            });
        }

        Ok(())
    }
}

impl Display for FfmpegInvocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "ffmpeg")?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_invocation_carries_lossless_flags() {
        let invocation = FfmpegInvocation::for_media(PathBuf::from("clip.mp4"));
        let args = invocation.args();
        assert!(args.contains(&"-hide_banner".to_string()));
        assert_eq!(args[args.len() - 4..].join(" "), "-crf 0 -preset veryslow");
    }

    #[test]
    fn flag_appends_name_then_value() {
        let invocation =
            FfmpegInvocation::for_media(PathBuf::from("clip.mp4")).flag("-vf", "select=1");
        let args = invocation.args();
        assert_eq!(args[args.len() - 2..].join(" "), "-vf select=1");
    }

    #[test]
    fn display_is_a_plausible_command_line() {
        let invocation = FfmpegInvocation::for_media(PathBuf::from("clip.mp4"));
        let rendered = invocation.to_string();
        assert!(rendered.starts_with("ffmpeg -hide_banner"));
        assert!(rendered.contains("-i clip.mp4"));
    }
}
