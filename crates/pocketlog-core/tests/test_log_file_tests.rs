// File-backed test logs

mod common;

use common::new_logger;
use pocketlog_core::config::TestLogConfig;
use pocketlog_core::{args, TestLog};
use tempfile::TempDir;

#[test]
fn test_lines_are_appended_to_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("case.log");
    let config = TestLogConfig {
        write_to_file: true,
        file: Some(path.clone()),
    };

    let log = new_logger("files");
    let test_log = TestLog::new("Files.append", &log, &config).unwrap();
    assert_eq!(test_log.log_file(), Some(path.as_path()));

    log.info("wrote {n} rows", args![12]);
    test_log.log().info("inside {step}", args!["verify"]);
    drop(test_log);

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].contains("▶"));
    assert!(lines[1].ends_with("wrote 12 rows"));
    assert!(lines[2].ends_with("inside verify"));
    assert!(lines[3].contains("⏹"));
}

#[test]
fn test_existing_file_is_appended_not_truncated() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shared.log");
    std::fs::write(&path, "previous\n").unwrap();

    let config = TestLogConfig {
        write_to_file: true,
        file: Some(path.clone()),
    };
    let log = new_logger("files");
    drop(TestLog::new("Files.shared", &log, &config).unwrap());

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("previous\n"));
    assert_eq!(contents.lines().count(), 3);
}

#[test]
fn test_unwritable_path_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let config = TestLogConfig {
        write_to_file: true,
        file: Some(dir.path().join("missing").join("x.log")),
    };
    let log = new_logger("files");
    let err = TestLog::new("Files.bad", &log, &config).err().unwrap();
    assert_eq!(err.code(), "ERR_IO");
}
