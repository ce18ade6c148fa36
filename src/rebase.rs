//! Regrouping of extracted frame sets by embedded timestamp metadata.
//!
//! Recording rigs drop frame sets into directories named after the capture
//! time (`HH_MM_SS`) nested under a project directory (for example
//! `2023_01_01 (copy)`). [`rebase_directory`] flattens that layout: each
//! image moves up next to its former parent, into
//! `<code>_<hour>/<code>_<HHMMSS>_<frame>.<ext>`, where `<code>` is a
//! six-character project code derived from the grandparent directory name.
//!
//! Files whose parent directory does not match the `HH_MM_SS` pattern are
//! reported and left in place. Subdirectories emptied by the pass are
//! removed afterwards; removal failures are reported, not fatal.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use walkdir::WalkDir;

use crate::correct::natural_key;
use crate::error::FramegrabError;
use crate::format::ImageFormat;

/// Capture-time directory names: `HH_MM_SS`, 24-hour clock, anchored at
/// the start so trailing annotations (`12_30_45_cam2`) still match.
static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01]?[0-9]|2[0-3])_([0-5][0-9])_([0-5][0-9])").expect("valid time pattern")
});

/// Parenthetical annotations in project directory names: ` (copy)`.
static ANNOTATION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s?\(\w+\)").expect("valid annotation pattern"));

/// Outcome counts for one rebase run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebaseReport {
    /// Images moved to their regrouped location.
    pub moved: usize,
    /// Images left in place (non-matching parent or occupied target).
    pub skipped: usize,
    /// Emptied subdirectories removed afterwards.
    pub removed_dirs: usize,
}

/// Regroup every image under `directory` by its parent's timestamp.
///
/// # Errors
///
/// [`FramegrabError::NotADirectory`] if `directory` is not an existing
/// directory; I/O errors from moving files are propagated. Per-image
/// skips and failed directory removals are logged and counted instead.
pub fn rebase_directory(directory: &Path) -> Result<RebaseReport, FramegrabError> {
    if !directory.is_dir() {
        return Err(FramegrabError::NotADirectory {
            path: directory.to_path_buf(),
        });
    }

    let mut report = RebaseReport::default();
    let mut visited_dirs: BTreeSet<PathBuf> = BTreeSet::new();

    for image in collect_images(directory) {
        if let Some(parent) = image.parent() {
            visited_dirs.insert(parent.to_path_buf());
        }

        let Some(target) = derive_target(&image) else {
            log::warn!("{} - skipped", image.display());
            report.skipped += 1;
            continue;
        };

        if target.exists() {
            log::warn!("{} : exists, skipping", target.display());
            report.skipped += 1;
            continue;
        }

        if let Some(target_dir) = target.parent() {
            fs::create_dir_all(target_dir)?;
        }
        fs::rename(&image, &target)?;
        report.moved += 1;
    }

    // Second pass: drop the directories the move emptied. Non-empty ones
    // (skipped files, foreign content) fail harmlessly.
    for dir in visited_dirs {
        match fs::remove_dir(&dir) {
            Ok(()) => report.removed_dirs += 1,
            Err(error) => log::warn!("Could not remove {}: {error}", dir.display()),
        }
    }

    Ok(report)
}

/// All image files under `root`, recursively, grouped by format in the
/// fixed scan order and natural-sorted within each group.
fn collect_images(root: &Path) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    for entry in WalkDir::new(root).min_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                log::warn!("Walk error under {}: {error}", root.display());
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path().to_path_buf();
        if let Some(position) = ImageFormat::ALL
            .iter()
            .position(|format| format.matches(&path))
        {
            candidates.push((position, natural_key(&path), path));
        }
    }

    candidates.sort();
    candidates.into_iter().map(|(_, _, path)| path).collect()
}

/// Derive the regrouped location for `image`, or `None` if its parent
/// directory does not carry an `HH_MM_SS` timestamp.
fn derive_target(image: &Path) -> Option<PathBuf> {
    let parent = image.parent()?;
    let dirname = parent.file_name()?.to_str()?;
    let grandparent = parent.parent()?;
    let grandparent_name = grandparent.file_name()?.to_str()?;

    let captures = TIME_PATTERN.captures(dirname)?;
    let hour = captures.get(1)?.as_str();

    let code = project_code(grandparent_name);
    let time_token = dirname.replace('_', "");
    let extension = image.extension()?.to_str()?;
    let stem = image.file_stem()?.to_str()?;

    // The trailing `_<digits>` segment is the frame number; anything else
    // keeps its original name under the new prefix.
    let frame_token = stem.rsplit_once('_').map_or(stem, |(_, last)| last);
    let file_name = match frame_token.parse::<u64>() {
        Ok(frame_number) => format!("{code}_{time_token}_{frame_number:06}.{extension}"),
        Err(_) => format!("{code}_{time_token}_{}", display_name(image)?),
    };

    Some(grandparent.join(format!("{code}_{hour}")).join(file_name))
}

fn display_name(image: &Path) -> Option<&str> {
    image.file_name()?.to_str()
}

/// Derive the project code from a grandparent directory name: underscores
/// removed, a leading `20` year prefix dropped, and parenthetical
/// annotations stripped when the remainder is exactly six characters.
fn project_code(name: &str) -> String {
    let mut code = name.replace('_', "");
    if let Some(stripped) = code.strip_prefix("20") {
        code = stripped.to_string();
    }

    let unbracketed = ANNOTATION_PATTERN.replace_all(&code, "");
    let unbracketed = unbracketed.trim();
    if unbracketed.chars().count() == 6 {
        code = unbracketed.to_string();
    }
    code
}
