//! Media walker integration tests.
//!
//! All fixtures are touch-created files in temp directories; the walker
//! only looks at names and file types, never at content.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use framegrab::{MediaEntry, MediaWalker};
use tempfile::TempDir;

fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create fixture directory");
    }
    File::create(path).expect("create fixture file");
}

/// A tree with media at several depths plus non-media noise.
fn fixture_tree() -> TempDir {
    let root = TempDir::new().expect("create temp dir");
    touch(&root.path().join("a.mp4"));
    touch(&root.path().join("b.AVI"));
    touch(&root.path().join("c.txt"));
    touch(&root.path().join("sub/d.mp4"));
    touch(&root.path().join("sub/deep/e.avi"));
    root
}

fn collect(walker: MediaWalker) -> BTreeSet<(PathBuf, PathBuf)> {
    walker
        .map(|entry| (entry.media, entry.output_dir))
        .collect()
}

#[test]
fn non_recursive_walk_yields_direct_children_only() {
    let root = fixture_tree();
    let entries = collect(MediaWalker::new(vec![root.path().to_path_buf()], None, false));

    let expected: BTreeSet<_> = [
        (root.path().join("a.mp4"), root.path().to_path_buf()),
        (root.path().join("b.AVI"), root.path().to_path_buf()),
    ]
    .into_iter()
    .collect();
    assert_eq!(entries, expected);
}

#[test]
fn recursive_walk_mirrors_subdirectories() {
    let root = fixture_tree();
    let entries = collect(MediaWalker::new(vec![root.path().to_path_buf()], None, true));

    let expected: BTreeSet<_> = [
        (root.path().join("a.mp4"), root.path().to_path_buf()),
        (root.path().join("b.AVI"), root.path().to_path_buf()),
        (root.path().join("sub/d.mp4"), root.path().join("sub")),
        (root.path().join("sub/deep/e.avi"), root.path().join("sub/deep")),
    ]
    .into_iter()
    .collect();
    assert_eq!(entries, expected);
}

#[test]
fn override_root_replaces_the_walked_directory() {
    let root = fixture_tree();
    let out = PathBuf::from("/tmp/framegrab-out");
    let entries = collect(MediaWalker::new(
        vec![root.path().to_path_buf()],
        Some(out.clone()),
        true,
    ));

    let expected: BTreeSet<_> = [
        (root.path().join("a.mp4"), out.clone()),
        (root.path().join("b.AVI"), out.clone()),
        (root.path().join("sub/d.mp4"), out.join("sub")),
        (root.path().join("sub/deep/e.avi"), out.join("sub/deep")),
    ]
    .into_iter()
    .collect();
    assert_eq!(entries, expected);
}

#[test]
fn file_input_maps_to_its_parent_or_the_override() {
    let root = fixture_tree();
    let media = root.path().join("a.mp4");

    let entries: Vec<MediaEntry> = MediaWalker::new(vec![media.clone()], None, false).collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].media, media);
    assert_eq!(entries[0].output_dir, root.path());

    let out = PathBuf::from("/tmp/framegrab-out");
    let entries: Vec<MediaEntry> =
        MediaWalker::new(vec![media.clone()], Some(out.clone()), false).collect();
    assert_eq!(entries[0].output_dir, out);
}

#[test]
fn unsupported_suffixes_are_never_yielded() {
    let root = fixture_tree();
    let entries = collect(MediaWalker::new(vec![root.path().to_path_buf()], None, true));
    for (media, _) in &entries {
        let ext = media
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        assert!(ext == "mp4" || ext == "avi", "unexpected entry: {media:?}");
    }
    assert!(
        !entries.iter().any(|(media, _)| media.ends_with("c.txt")),
        "non-media file must be filtered out"
    );
}

#[test]
fn missing_paths_are_skipped_not_fatal() {
    let root = fixture_tree();
    let entries = collect(MediaWalker::new(
        vec![
            PathBuf::from("/nonexistent/nowhere.mp4"),
            root.path().join("a.mp4"),
        ],
        None,
        false,
    ));
    assert_eq!(entries.len(), 1);
}

#[test]
fn a_fresh_walker_restarts_the_sequence() {
    let root = fixture_tree();
    let first = collect(MediaWalker::new(vec![root.path().to_path_buf()], None, true));
    let second = collect(MediaWalker::new(vec![root.path().to_path_buf()], None, true));
    assert_eq!(first, second);
}
