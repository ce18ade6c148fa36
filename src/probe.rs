//! Frame-rate probing via `ffprobe`.
//!
//! The extraction filters need the source frame rate, which only the
//! container knows. `ffprobe` is asked for the primary video stream's
//! `r_frame_rate` in its rational text form (`30000/1001`) and the reply is
//! parsed as a floating-point ratio.
//!
//! Callers that can tolerate an unknown frame rate (task construction does)
//! downgrade the error to `None` and log it; the probe itself always reports
//! exactly what failed.

use std::path::Path;
use std::process::Command;

use crate::error::FramegrabError;

/// Query the frame rate of `media`'s primary video stream.
///
/// # Errors
///
/// [`FramegrabError::ToolNotFound`] if `ffprobe` is not on `PATH`;
/// [`FramegrabError::ProbeFailed`] if the probe exits non-zero, replies
/// with non-UTF-8 bytes, or the reply is not a parseable rational.
pub fn video_frame_rate(media: &Path) -> Result<f64, FramegrabError> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "0",
            "-of",
            "csv=p=0",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=r_frame_rate",
        ])
        .arg(media)
        .output()
        .map_err(|error| {
            if error.kind() == std::io::ErrorKind::NotFound {
                FramegrabError::ToolNotFound { tool: "ffprobe" }
            } else {
                probe_failed(media, error.to_string())
            }
        })?;

    if !output.status.success() {
        return Err(probe_failed(media, output.status.to_string()));
    }

    let reply = String::from_utf8(output.stdout)
        .map_err(|error| probe_failed(media, format!("non-UTF-8 reply: {error}")))?;

    let rate = parse_rational(reply.trim())
        .ok_or_else(|| probe_failed(media, format!("unparseable frame rate {:?}", reply.trim())))?;

    log::debug!("Probed frame rate of {}: {rate}", media.display());
    Ok(rate)
}

fn probe_failed(media: &Path, reason: String) -> FramegrabError {
    FramegrabError::ProbeFailed {
        path: media.to_path_buf(),
        reason,
    }
}

/// Parse ffprobe's rational frame-rate form (`30000/1001`) or a plain
/// number (`25`). Returns `None` for empty input, garbage, a zero
/// denominator, or a non-finite result.
fn parse_rational(value: &str) -> Option<f64> {
    let ratio = match value.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator: f64 = numerator.trim().parse().ok()?;
            let denominator: f64 = denominator.trim().parse().ok()?;
            if denominator == 0.0 {
                return None;
            }
            numerator / denominator
        }
        None => value.parse().ok()?,
    };

    ratio.is_finite().then_some(ratio)
}

#[cfg(test)]
mod tests {
    use super::parse_rational;

    #[test]
    fn parses_ntsc_rational() {
        let rate = parse_rational("30000/1001").expect("rational should parse");
        assert!((rate - 29.97).abs() < 0.01);
    }

    #[test]
    fn parses_plain_number() {
        assert_eq!(parse_rational("25"), Some(25.0));
        assert_eq!(parse_rational("23.976"), Some(23.976));
    }

    #[test]
    fn rejects_garbage_and_zero_denominator() {
        assert_eq!(parse_rational(""), None);
        assert_eq!(parse_rational("N/A"), None);
        assert_eq!(parse_rational("30/0"), None);
        assert_eq!(parse_rational("abc/def"), None);
    }
}
