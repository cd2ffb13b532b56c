//! End-to-end tests for the asset-sync plugin
//!
//! Each test builds real input/output trees under a temp directory, runs
//! the handle's write-completed hook, and asserts on the resulting output
//! tree and report.

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use assert_fs::TempDir;
use assert_fs::prelude::*;
use mirror_core::{Error, SyncOptions, SyncReport, sync};
use predicates::prelude::*;

/// Pin a file's mtime so staleness comparisons are deterministic.
fn stamp(path: &Path, mtime: SystemTime) {
    let file = fs::OpenOptions::new().write(true).open(path).unwrap();
    file.set_modified(mtime).unwrap();
}

fn epoch_plus(secs: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
}

async fn run(input: &Path, output: &Path) -> SyncReport {
    let handle = sync(SyncOptions::new(input, output)).unwrap();
    handle.on_write_complete().await.unwrap()
}

#[tokio::test]
async fn new_files_propagate_with_content_and_mtime() {
    let temp = TempDir::new().unwrap();
    let input = temp.child("in");
    let output = temp.child("out");
    input.child("logo.png").write_str("png-bytes").unwrap();

    let report = run(input.path(), output.path()).await;

    assert!(report.success);
    output.child("logo.png").assert("png-bytes");
    let in_mtime = fs::metadata(input.child("logo.png").path())
        .unwrap()
        .modified()
        .unwrap();
    let out_mtime = fs::metadata(output.child("logo.png").path())
        .unwrap()
        .modified()
        .unwrap();
    assert_eq!(in_mtime, out_mtime);
}

#[tokio::test]
async fn nested_directories_are_mirrored() {
    let temp = TempDir::new().unwrap();
    let input = temp.child("in");
    let output = temp.child("out");
    input.child("a/b/c/deep.txt").write_str("deep").unwrap();
    input.child("a/side.txt").write_str("side").unwrap();

    let report = run(input.path(), output.path()).await;

    assert!(report.success);
    output.child("a/b/c/deep.txt").assert("deep");
    output.child("a/side.txt").assert("side");
}

#[tokio::test]
async fn second_sync_is_a_noop() {
    let temp = TempDir::new().unwrap();
    let input = temp.child("in");
    let output = temp.child("out");
    input.child("a.txt").write_str("a").unwrap();
    input.child("sub/b.txt").write_str("b").unwrap();

    let first = run(input.path(), output.path()).await;
    assert_eq!(first.actions.len(), 2);

    let second = run(input.path(), output.path()).await;
    assert!(second.success);
    assert!(
        second.actions.is_empty(),
        "second run should schedule nothing, got {:?}",
        second.actions
    );
}

#[tokio::test]
async fn stale_file_is_overwritten() {
    let temp = TempDir::new().unwrap();
    let input = temp.child("in");
    let output = temp.child("out");
    input.child("style.css").write_str("fresh").unwrap();
    output.child("style.css").write_str("marker-stale").unwrap();
    stamp(input.child("style.css").path(), epoch_plus(2_000_000));
    stamp(output.child("style.css").path(), epoch_plus(1_000_000));

    let report = run(input.path(), output.path()).await;

    assert!(report.success);
    output.child("style.css").assert("fresh");
}

#[tokio::test]
async fn equal_mtime_file_is_left_untouched() {
    let temp = TempDir::new().unwrap();
    let input = temp.child("in");
    let output = temp.child("out");
    input.child("style.css").write_str("fresh").unwrap();
    // The marker survives only if no copy happens.
    output.child("style.css").write_str("marker-keep").unwrap();
    let mtime = epoch_plus(1_500_000);
    stamp(input.child("style.css").path(), mtime);
    stamp(output.child("style.css").path(), mtime);

    let report = run(input.path(), output.path()).await;

    assert!(report.success);
    assert!(report.actions.is_empty());
    output.child("style.css").assert("marker-keep");
}

#[tokio::test]
async fn orphans_are_removed_and_shared_files_kept() {
    let temp = TempDir::new().unwrap();
    let input = temp.child("in");
    let output = temp.child("out");
    input.child("kept.txt").write_str("kept").unwrap();

    // Pre-sync the shared file so it compares equal, then plant an orphan.
    run(input.path(), output.path()).await;
    output.child("old/orphan.txt").write_str("gone").unwrap();

    let report = run(input.path(), output.path()).await;

    assert!(report.success);
    output
        .child("old/orphan.txt")
        .assert(predicate::path::missing());
    output.child("kept.txt").assert("kept");
}

#[tokio::test]
async fn missing_input_root_is_silent_and_leaves_output_alone() {
    let temp = TempDir::new().unwrap();
    let output = temp.child("out");
    output.child("existing.txt").write_str("untouched").unwrap();

    let handle = sync(SyncOptions::new(
        temp.path().join("does-not-exist"),
        output.path(),
    ))
    .unwrap();
    let report = handle.on_write_complete().await.unwrap();

    assert!(report.success);
    assert!(report.actions.is_empty());
    output.child("existing.txt").assert("untouched");
}

#[test]
fn precondition_errors_are_raised_before_any_io() {
    let missing = sync(SyncOptions {
        input: None,
        output: Some("x".into()),
        verbose: false,
    });
    assert!(matches!(missing, Err(Error::MissingArgument)));

    // Same directory after lexical normalization; neither path exists, so
    // the check cannot have touched the filesystem.
    let same = sync(SyncOptions::new("a/./b", "a/c/../b"));
    assert!(matches!(same, Err(Error::SameDirectory { .. })));
}

#[tokio::test]
async fn one_failed_copy_does_not_stop_the_batch() {
    let temp = TempDir::new().unwrap();
    let input = temp.child("in");
    let output = temp.child("out");
    input.child("a.txt").write_str("a").unwrap();
    input.child("b.txt").write_str("b").unwrap();
    // `blocked` is a file in the input but a directory in the output, so
    // its copy fails while everything else proceeds.
    input.child("blocked").write_str("payload").unwrap();
    output.child("blocked/inner.txt").write_str("orphan").unwrap();

    let report = run(input.path(), output.path()).await;

    assert!(!report.success);
    assert_eq!(report.errors.len(), 1);
    output.child("a.txt").assert("a");
    output.child("b.txt").assert("b");
    // The orphan inside the blocking directory was still removed.
    output
        .child("blocked/inner.txt")
        .assert(predicate::path::missing());
}

#[tokio::test]
async fn verbose_handle_reports_every_action() {
    let temp = TempDir::new().unwrap();
    let input = temp.child("in");
    let output = temp.child("out");
    input.child("a.txt").write_str("a").unwrap();
    output.child("orphan.txt").write_str("x").unwrap();

    let handle = sync(SyncOptions::new(input.path(), output.path()).verbose(true)).unwrap();
    let report = handle.on_write_complete().await.unwrap();

    assert!(report.success);
    assert_eq!(report.actions.len(), 2);
    assert!(report.actions.iter().any(|a| a.starts_with("copy: ")));
    assert!(report.actions.iter().any(|a| a.starts_with("unlink: ")));
}
