//! Media walker.
//!
//! [`MediaWalker`] turns the ordered list of CLI input paths into a lazy
//! sequence of [`MediaEntry`] pairs: a media file plus the directory its
//! extracted frames should land under. Files map to their parent directory
//! (or the override root); directories are traversed — recursively when
//! requested — and each found media file's output directory mirrors its
//! relative location under the destination root.
//!
//! A path that does not exist is logged and skipped; the walk never fails as
//! a whole. The sequence follows filesystem enumeration order and is
//! restartable by constructing a fresh walker.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::format::is_media_file;

/// One unit of work for the dispatcher: a media file and the root its
/// frames are extracted under.
///
/// The extraction task later nests one more level (the media's stem) below
/// `output_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaEntry {
    /// The media file to extract frames from.
    pub media: PathBuf,
    /// The effective output root for this media file.
    pub output_dir: PathBuf,
}

/// Lazy iterator over `(media, output directory)` pairs.
///
/// # Example
///
/// ```no_run
/// use std::path::PathBuf;
///
/// use framegrab::MediaWalker;
///
/// let walker = MediaWalker::new(vec![PathBuf::from("recordings")], None, true);
/// for entry in walker {
///     println!("{} -> {}", entry.media.display(), entry.output_dir.display());
/// }
/// ```
pub struct MediaWalker {
    inputs: std::vec::IntoIter<PathBuf>,
    output_root: Option<PathBuf>,
    recursive: bool,
    /// Traversal state for the directory input currently being walked.
    current: Option<DirectoryWalk>,
}

struct DirectoryWalk {
    base: PathBuf,
    destination: PathBuf,
    entries: walkdir::IntoIter,
}

impl MediaWalker {
    /// Create a walker over `inputs`.
    ///
    /// `output_root` overrides the per-input destination when given;
    /// `recursive` controls whether directory inputs are traversed beyond
    /// their direct children.
    pub fn new(inputs: Vec<PathBuf>, output_root: Option<PathBuf>, recursive: bool) -> Self {
        Self {
            inputs: inputs.into_iter(),
            output_root,
            recursive,
            current: None,
        }
    }

    /// Advance the in-progress directory traversal, if any.
    fn next_from_directory(&mut self) -> Option<MediaEntry> {
        let walk = self.current.as_mut()?;

        for entry in walk.entries.by_ref() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    log::warn!("Walk error under {}: {error}", walk.base.display());
                    continue;
                }
            };

            if !entry.file_type().is_file() || !is_media_file(entry.path()) {
                continue;
            }

            let media = entry.path().to_path_buf();
            let output_dir = mirror_output_dir(&walk.destination, &walk.base, &media);
            return Some(MediaEntry { media, output_dir });
        }

        self.current = None;
        None
    }

    fn start_directory(&mut self, dir: PathBuf) {
        let destination = self
            .output_root
            .clone()
            .unwrap_or_else(|| dir.clone());
        let max_depth = if self.recursive { usize::MAX } else { 1 };
        self.current = Some(DirectoryWalk {
            entries: WalkDir::new(&dir)
                .min_depth(1)
                .max_depth(max_depth)
                .into_iter(),
            base: dir,
            destination,
        });
    }
}

impl Iterator for MediaWalker {
    type Item = MediaEntry;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.next_from_directory() {
                return Some(entry);
            }

            let path = self.inputs.next()?;

            if !path.exists() {
                log::warn!("{} - does not exist, skipping", path.display());
                continue;
            }

            if path.is_file() {
                if !is_media_file(&path) {
                    log::debug!("{} - unsupported media suffix, skipping", path.display());
                    continue;
                }
                let output_dir = match (&self.output_root, path.parent()) {
                    (Some(root), _) => root.clone(),
                    (None, Some(parent)) => parent.to_path_buf(),
                    (None, None) => PathBuf::from("."),
                };
                return Some(MediaEntry {
                    media: path,
                    output_dir,
                });
            }

            self.start_directory(path);
        }
    }
}

/// Compute the output directory for a media file found under a walked
/// directory: the destination root joined with the media's parent path
/// relative to the walked base, preserving subdirectory structure.
fn mirror_output_dir(destination: &Path, base: &Path, media: &Path) -> PathBuf {
    media
        .parent()
        .and_then(|parent| parent.strip_prefix(base).ok())
        .map(|relative| destination.join(relative))
        .unwrap_or_else(|| destination.to_path_buf())
}
