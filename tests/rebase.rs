//! Rebase (regroup) integration tests.

use std::fs::{self, File};
use std::path::Path;

use framegrab::{FramegrabError, rebase_directory};
use tempfile::TempDir;

fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create fixture directory");
    }
    File::create(path).expect("create fixture file");
}

#[test]
fn timestamped_parents_are_regrouped() {
    let root = TempDir::new().expect("create temp dir");
    let project = root.path().join("2023_01_01 (copy)");
    touch(&project.join("12_30_45/1.png"));
    touch(&project.join("12_30_45/13.png"));

    let report = rebase_directory(root.path()).expect("rebase should succeed");

    assert_eq!(report.moved, 2);
    assert_eq!(report.skipped, 0);
    // The emptied capture directory is gone, the regrouped one exists.
    assert!(!project.join("12_30_45").exists());
    assert_eq!(report.removed_dirs, 1);
    assert!(project.join("230101_12/230101_123045_000001.png").is_file());
    assert!(project.join("230101_12/230101_123045_000013.png").is_file());
}

#[test]
fn non_matching_parents_are_reported_and_left_in_place() {
    let root = TempDir::new().expect("create temp dir");
    let project = root.path().join("2023_01_01");
    touch(&project.join("notes/cover.png"));
    touch(&project.join("12_30_45/2.png"));

    let report = rebase_directory(root.path()).expect("rebase should succeed");

    assert_eq!(report.moved, 1);
    assert_eq!(report.skipped, 1);
    assert!(
        project.join("notes/cover.png").is_file(),
        "non-matching parent must be untouched"
    );
    // `notes` still holds its file, so only the capture dir was removed.
    assert_eq!(report.removed_dirs, 1);
}

#[test]
fn occupied_targets_are_skipped() {
    let root = TempDir::new().expect("create temp dir");
    let project = root.path().join("2023_01_01");
    touch(&project.join("12_30_45/7.png"));
    touch(&project.join("230101_12/230101_123045_000007.png"));

    let report = rebase_directory(root.path()).expect("rebase should succeed");

    assert_eq!(report.moved, 0);
    assert!(report.skipped >= 1);
    assert!(
        project.join("12_30_45/7.png").is_file(),
        "skipped image must stay in place"
    );
}

#[test]
fn non_frame_stems_keep_their_name_under_the_new_prefix() {
    let root = TempDir::new().expect("create temp dir");
    let project = root.path().join("2023_01_01");
    touch(&project.join("12_30_45/contact_sheet.jpg"));

    let report = rebase_directory(root.path()).expect("rebase should succeed");

    assert_eq!(report.moved, 1);
    assert!(
        project
            .join("230101_12/230101_123045_contact_sheet.jpg")
            .is_file()
    );
}

#[test]
fn non_image_files_are_ignored() {
    let root = TempDir::new().expect("create temp dir");
    let project = root.path().join("2023_01_01");
    touch(&project.join("12_30_45/notes.txt"));

    let report = rebase_directory(root.path()).expect("rebase should succeed");

    assert_eq!(report.moved, 0);
    assert_eq!(report.skipped, 0);
    assert!(project.join("12_30_45/notes.txt").is_file());
}

#[test]
fn missing_directory_is_fatal() {
    let result = rebase_directory(Path::new("/nonexistent/frames"));
    assert!(matches!(result, Err(FramegrabError::NotADirectory { .. })));

    let root = TempDir::new().expect("create temp dir");
    let file = root.path().join("plain.png");
    touch(&file);
    let result = rebase_directory(&file);
    assert!(matches!(result, Err(FramegrabError::NotADirectory { .. })));
}
