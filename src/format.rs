//! Supported media and image formats.
//!
//! Two fixed sets drive the whole pipeline: the media suffixes the walker
//! accepts (`avi`, `mp4`) and the image formats ffmpeg is asked to write
//! (`png`, `jpg`, `bmp`). Both are matched case-insensitively on input but
//! always emitted lowercase.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;
use std::str::FromStr;

use crate::error::FramegrabError;

/// Media file suffixes the walker yields, without the leading dot.
pub const MEDIA_EXTENSIONS: [&str; 2] = ["avi", "mp4"];

/// Returns `true` if `path` carries a supported media suffix.
///
/// The comparison is case-insensitive, so `CLIP.MP4` is accepted.
pub fn is_media_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            MEDIA_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Output image format for extracted frames.
///
/// This is the extension handed to ffmpeg's output pattern; the encoder is
/// chosen by ffmpeg from the extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    /// Lossless PNG. This is the default.
    #[default]
    Png,
    /// JPEG.
    Jpg,
    /// Uncompressed BMP.
    Bmp,
}

impl ImageFormat {
    /// All supported formats, in the order the corrector scans them.
    pub const ALL: [ImageFormat; 3] = [ImageFormat::Png, ImageFormat::Jpg, ImageFormat::Bmp];

    /// The lowercase file extension, without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Bmp => "bmp",
        }
    }

    /// Returns `true` if `path` carries this format's extension
    /// (case-insensitive).
    pub fn matches(self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(self.extension()))
    }
}

impl Display for ImageFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = FramegrabError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpg),
            "bmp" => Ok(ImageFormat::Bmp),
            other => Err(FramegrabError::UnsupportedImageFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn media_suffix_is_case_insensitive() {
        assert!(is_media_file(&PathBuf::from("clip.mp4")));
        assert!(is_media_file(&PathBuf::from("CLIP.MP4")));
        assert!(is_media_file(&PathBuf::from("record.AvI")));
        assert!(!is_media_file(&PathBuf::from("movie.mkv")));
        assert!(!is_media_file(&PathBuf::from("no_extension")));
    }

    #[test]
    fn image_format_round_trip() {
        assert_eq!("png".parse::<ImageFormat>().unwrap(), ImageFormat::Png);
        assert_eq!("JPEG".parse::<ImageFormat>().unwrap(), ImageFormat::Jpg);
        assert_eq!("bmp".parse::<ImageFormat>().unwrap(), ImageFormat::Bmp);
        assert!("gif".parse::<ImageFormat>().is_err());
        assert_eq!(ImageFormat::Png.to_string(), "png");
    }

    #[test]
    fn image_format_matches_extension() {
        assert!(ImageFormat::Png.matches(&PathBuf::from("frame.PNG")));
        assert!(!ImageFormat::Png.matches(&PathBuf::from("frame.jpg")));
    }
}
