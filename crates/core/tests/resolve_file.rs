//! End-to-end tests for resolving conflict markers in files on disk.
//!
//! These exercise the full read-filter-overwrite pipeline with real files
//! in temp directories: success paths for both write modes, plus the
//! missing-file and invalid-UTF-8 fatal conditions.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use conflictsweep_core::conflict::{resolve_file, scan_file, ResolveOptions, Side};
use conflictsweep_core::errors::ResolveError;

// ===========================================================================
// Helpers
// ===========================================================================

const CONFLICTED: &str = "line1\n\
    <<<<<<< HEAD\n\
    currentA\n\
    currentB\n\
    =======\n\
    incomingA\n\
    >>>>>>> branch\n\
    line2\n";

const RESOLVED: &str = "line1\nincomingA\nline2\n";

/// Write `contents` to `name` inside `dir` and return the full path.
fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

// ===========================================================================
// Success paths
// ===========================================================================

#[test]
fn test_resolve_rewrites_file_in_place() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "conflicted.txt", CONFLICTED);

    let report = resolve_file(&path, &ResolveOptions::default()).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), RESOLVED);
    assert_eq!(report.conflicts_resolved, 1);
    assert!(report.changed);
}

#[test]
fn test_resolve_keeping_current_side() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "conflicted.txt", CONFLICTED);

    let options = ResolveOptions {
        side: Side::Current,
        ..Default::default()
    };
    resolve_file(&path, &options).unwrap();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "line1\ncurrentA\ncurrentB\nline2\n"
    );
}

#[test]
fn test_write_modes_produce_identical_content() {
    let dir = TempDir::new().unwrap();
    let atomic_path = write_file(dir.path(), "atomic.txt", CONFLICTED);
    let direct_path = write_file(dir.path(), "direct.txt", CONFLICTED);

    resolve_file(&atomic_path, &ResolveOptions::default()).unwrap();
    resolve_file(
        &direct_path,
        &ResolveOptions {
            atomic: false,
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(
        std::fs::read_to_string(&atomic_path).unwrap(),
        std::fs::read_to_string(&direct_path).unwrap()
    );
}

#[test]
fn test_empty_file_stays_empty() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "empty.txt", "");

    let report = resolve_file(&path, &ResolveOptions::default()).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    assert_eq!(report.conflicts_resolved, 0);
    assert!(!report.changed);
}

#[test]
fn test_file_without_markers_is_untouched() {
    let contents = "alpha\nbeta\ngamma\n";
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "plain.txt", contents);

    let report = resolve_file(&path, &ResolveOptions::default()).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), contents);
    assert!(!report.changed);
}

#[test]
fn test_resolve_is_idempotent_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "conflicted.txt", CONFLICTED);

    resolve_file(&path, &ResolveOptions::default()).unwrap();
    let report = resolve_file(&path, &ResolveOptions::default()).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), RESOLVED);
    assert_eq!(report.conflicts_resolved, 0);
    assert!(!report.changed);
}

#[test]
fn test_relative_path_atomic_write() {
    // A bare filename has no parent directory; the temp file must land in ".".
    let dir = TempDir::new().unwrap();
    let old_cwd = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    std::fs::write("conflicted.txt", CONFLICTED).unwrap();
    let result = resolve_file(Path::new("conflicted.txt"), &ResolveOptions::default());
    let contents = std::fs::read_to_string("conflicted.txt").unwrap();

    std::env::set_current_dir(old_cwd).unwrap();

    result.unwrap();
    assert_eq!(contents, RESOLVED);
}

// ===========================================================================
// Error paths
// ===========================================================================

#[test]
fn test_missing_file_is_file_not_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does-not-exist.txt");

    let err = resolve_file(&path, &ResolveOptions::default()).unwrap_err();
    assert!(matches!(err, ResolveError::FileNotFound(_)));
}

#[test]
fn test_invalid_utf8_is_encoding_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("binary.dat");
    std::fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).unwrap();

    let err = resolve_file(&path, &ResolveOptions::default()).unwrap_err();
    assert!(matches!(err, ResolveError::InvalidUtf8(_)));
}

#[test]
fn test_failed_resolve_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("binary.dat");
    let original = [0xff, 0xfe, 0x00, 0x41];
    std::fs::write(&path, original).unwrap();

    let _ = resolve_file(&path, &ResolveOptions::default()).unwrap_err();
    assert_eq!(std::fs::read(&path).unwrap(), original);
}

// ===========================================================================
// Scanning files
// ===========================================================================

#[test]
fn test_scan_file_reports_blocks() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "conflicted.txt", CONFLICTED);

    let report = scan_file(&path).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.blocks.len(), 1);
    assert_eq!(report.blocks[0].start_line, 2);
    assert_eq!(report.blocks[0].separator_line, Some(5));
    assert_eq!(report.blocks[0].end_line, Some(7));

    // Scanning never modifies the file.
    assert_eq!(std::fs::read_to_string(&path).unwrap(), CONFLICTED);
}

#[test]
fn test_scan_missing_file_errors() {
    let dir = TempDir::new().unwrap();
    let err = scan_file(&dir.path().join("nope.txt")).unwrap_err();
    assert!(matches!(err, ResolveError::FileNotFound(_)));
}
