//! Tests for file logging setup.

use super::*;
use serial_test::serial;
use std::fs;

fn test_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("catbrowse_test_logs_{}_{}", name, std::process::id()))
}

#[test]
#[serial(tracing_init)]
fn init_creates_log_directory_if_missing() {
    let dir = test_dir("create");
    let log_file = dir.join("test.log");
    let _ = fs::remove_dir_all(&dir);

    // May fail if another test already installed a subscriber; the directory
    // is created either way.
    let _ = init(&log_file);

    assert!(dir.exists(), "Log directory should be created: {:?}", dir);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
#[serial(tracing_init)]
fn second_init_reports_subscriber_already_set() {
    let dir = test_dir("twice");
    let log_file = dir.join("twice.log");

    let _ = init(&log_file);
    let second = init(&log_file);

    assert!(
        matches!(second, Err(LoggingError::SubscriberAlreadySet)),
        "Expected SubscriberAlreadySet, got {:?}",
        second
    );
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn file_subscriber_writes_events_without_ansi() {
    let dir = test_dir("write");
    let log_file = dir.join("app.log");
    let _ = fs::remove_dir_all(&dir);

    let subscriber = file_subscriber(&log_file).expect("subscriber builds");
    tracing::subscriber::with_default(subscriber, || {
        tracing::warn!(sequence = 7, "Catalog fetch failed");
    });

    let contents = fs::read_to_string(&log_file).expect("log file written");
    assert!(contents.contains("Catalog fetch failed"), "got: {contents}");
    assert!(contents.contains("sequence=7"), "got: {contents}");
    assert!(!contents.contains('\u{1b}'), "Log file must not contain ANSI escapes");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn file_subscriber_rejects_path_without_file_name() {
    let result = file_subscriber(Path::new("/"));
    assert!(
        matches!(
            result,
            Err(LoggingError::NoParentDirectory(_)) | Err(LoggingError::InvalidPath(_))
        ),
        "Root path has no file name"
    );
}

#[test]
fn directory_creation_failure_is_reported() {
    let dir = test_dir("blocked");
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("temp dir");
    let blocker = dir.join("not_a_dir");
    fs::write(&blocker, "file").expect("blocker file");

    let result = file_subscriber(&blocker.join("nested").join("app.log"));
    assert!(
        matches!(result, Err(LoggingError::DirectoryCreation { .. })),
        "A file in the way of the log directory must be reported"
    );

    let _ = fs::remove_dir_all(&dir);
}
