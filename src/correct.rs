//! Post-extraction filename correction.
//!
//! ffmpeg numbers its output files 1, 2, 3, … regardless of which source
//! frames were actually selected. [`correct_filenames`] renames a task's
//! outputs so the filename reflects the true frame index (frame-interval
//! mode) or the elapsed milliseconds since the start (time-interval mode):
//!
//! - frame mode, interval `n`: sequence `s` becomes `(s - 1) * n + 1`
//! - time mode, interval `ms`: sequence `s` becomes `(s - 1) * ms`
//!
//! Only files carrying the task's `<id>_` prefix are touched, so unrelated
//! files — including the outputs of earlier, already-corrected runs, whose
//! names no longer carry any prefix — are never reinterpreted.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::FramegrabError;
use crate::format::ImageFormat;

/// Build a natural-sort key for `path`.
///
/// Each path component is split into alternating non-digit/digit runs;
/// digit runs shorter than 16 characters are zero-padded to width 16 so
/// that lexical comparison of the key orders them numerically
/// (`frame_2` before `frame_10`).
pub fn natural_key(path: &Path) -> Vec<String> {
    let mut key = Vec::new();
    for component in path.components() {
        let part = component.as_os_str().to_string_lossy();
        let mut run = String::new();
        let mut run_is_digits = false;

        for ch in part.chars() {
            if ch.is_ascii_digit() == run_is_digits {
                run.push(ch);
            } else {
                push_run(&mut key, run, run_is_digits);
                run = String::from(ch);
                run_is_digits = ch.is_ascii_digit();
            }
        }
        push_run(&mut key, run, run_is_digits);
    }
    key
}

fn push_run(key: &mut Vec<String>, run: String, is_digits: bool) {
    if run.is_empty() {
        return;
    }
    if is_digits && run.len() < 16 {
        // Strip leading zeros, then pad back out so "007" and "7" compare equal.
        key.push(format!("{:0>16}", run.trim_start_matches('0')));
    } else {
        key.push(run);
    }
}

/// Enumerate the files in `directory` whose name starts with `prefix` and
/// whose suffix is a supported image format, grouped by format in the
/// fixed scan order and natural-sorted within each group.
fn sorted_with_prefix(directory: &Path, prefix: &str) -> Result<Vec<PathBuf>, FramegrabError> {
    let mut candidates = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let name = match path.file_name().and_then(|name| name.to_str()) {
            Some(name) => name,
            None => continue,
        };
        if !name.starts_with(prefix) {
            continue;
        }
        if let Some(position) = ImageFormat::ALL
            .iter()
            .position(|format| format.matches(&path))
        {
            candidates.push((position, natural_key(&path), path));
        }
    }

    candidates.sort();
    Ok(candidates.into_iter().map(|(_, _, path)| path).collect())
}

/// Rename a task's sequential outputs to their display indices.
///
/// `interval` is the sampling interval the extraction ran with (frames or
/// milliseconds); `time_based` selects the time-interval numbering.
/// Returns the number of files renamed. Files with an unparseable
/// sequence number, a foreign prefix, or an already-occupied rename
/// target are logged and skipped without failing the batch.
///
/// # Errors
///
/// [`FramegrabError::NotADirectory`] if `directory` is not an existing
/// directory, [`FramegrabError::InvalidInterval`] if `interval` is zero;
/// I/O errors from enumeration or renaming are propagated.
pub fn correct_filenames(
    directory: &Path,
    task_id: Uuid,
    interval: u64,
    time_based: bool,
) -> Result<usize, FramegrabError> {
    if !directory.is_dir() {
        return Err(FramegrabError::NotADirectory {
            path: directory.to_path_buf(),
        });
    }
    if interval == 0 {
        return Err(FramegrabError::InvalidInterval);
    }

    let id = task_id.to_string();
    let prefix = format!("{id}_");
    let mut renamed = 0;

    for image in sorted_with_prefix(directory, &prefix)? {
        let stem = match image.file_stem().and_then(|stem| stem.to_str()) {
            Some(stem) => stem,
            None => {
                log::warn!("Skip (no stem): {}", image.display());
                continue;
            }
        };

        // The stem is `<id>_<sequence>`; anything else was not produced
        // by this task's extraction run.
        let sequence = match stem.rsplit_once('_') {
            Some((head, digits)) if head == id => digits.parse::<u64>().ok(),
            _ => None,
        };
        let Some(sequence) = sequence else {
            log::warn!("Skip (unexpected name): {}", image.display());
            continue;
        };
        let Some(zero_based) = sequence.checked_sub(1) else {
            log::warn!("Skip (sequence 0): {}", image.display());
            continue;
        };

        let offset = if time_based { 0 } else { 1 };
        let display_index = zero_based * interval + offset;
        let extension = image
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        let target = directory.join(format!("{display_index}.{extension}"));

        if target.exists() {
            log::warn!("Skip (target exists): {}", target.display());
            continue;
        }

        fs::rename(&image, &target)?;
        renamed += 1;
    }

    log::debug!(
        "Corrected {renamed} filename(s) in {}",
        directory.display()
    );
    Ok(renamed)
}

#[cfg(test)]
mod tests {
    use super::natural_key;
    use std::path::PathBuf;

    #[test]
    fn digit_runs_compare_numerically() {
        let a1 = natural_key(&PathBuf::from("a_1.png"));
        let a2 = natural_key(&PathBuf::from("a_2.png"));
        let a10 = natural_key(&PathBuf::from("a_10.png"));
        assert!(a1 < a2);
        assert!(a2 < a10);
    }

    #[test]
    fn leading_zeros_are_insignificant() {
        assert_eq!(
            natural_key(&PathBuf::from("frame_007.png")),
            natural_key(&PathBuf::from("frame_7.png")),
        );
    }

    #[test]
    fn long_digit_runs_stay_lexical() {
        // 16+ digit runs are not padded; they keep their raw form.
        let run = "9".repeat(17);
        let key = natural_key(&PathBuf::from(format!("f_{run}.png")));
        assert!(key.contains(&run));
    }
}
