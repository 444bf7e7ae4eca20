//! 命令历史缓冲区测试

use tempfile::TempDir;
use termsuggest_lib::completion::{HistoryBuffer, HistoryError};

#[test]
fn test_capacity_invariant() {
    let mut history = HistoryBuffer::new(4);

    for i in 0..20 {
        history.add(&format!("cmd {i}"));
        assert!(history.len() <= 4);
    }

    assert_eq!(
        history.snapshot(),
        vec!["cmd 16", "cmd 17", "cmd 18", "cmd 19"]
    );
}

#[test]
fn test_oldest_evicted_first() {
    let mut history = HistoryBuffer::new(3);
    for command in ["a", "b", "c"] {
        history.add(command);
    }

    history.add("d");
    assert_eq!(history.snapshot(), vec!["b", "c", "d"]);

    history.add("e");
    assert_eq!(history.snapshot(), vec!["c", "d", "e"]);
}

#[test]
fn test_no_consecutive_duplicates() {
    let mut history = HistoryBuffer::new(10);

    history.add("make test");
    let before = history.len();
    history.add("make test");
    history.add("  make test ");

    assert_eq!(history.len(), before);

    // 非连续的重复允许
    history.add("ls");
    history.add("make test");
    assert_eq!(history.snapshot(), vec!["make test", "ls", "make test"]);
}

#[tokio::test]
async fn test_save_and_load_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("history");

    let mut history = HistoryBuffer::new(10).with_path(&path);
    for command in ["ls", "cd /tmp", "go build -v"] {
        history.add(command);
    }
    history.save_to_disk().await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "ls\ncd /tmp\ngo build -v");

    let mut restored = HistoryBuffer::new(10).with_path(&path);
    let count = restored.load_from_disk().await.unwrap();

    assert_eq!(count, 3);
    assert_eq!(restored.snapshot(), history.snapshot());
}

#[tokio::test]
async fn test_round_trip_after_wraparound() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("history");

    let mut history = HistoryBuffer::new(3).with_path(&path);
    for command in ["one", "two", "three", "four", "five"] {
        history.add(command);
    }
    history.save_to_disk().await.unwrap();

    let mut restored = HistoryBuffer::new(3).with_path(&path);
    restored.load_from_disk().await.unwrap();

    assert_eq!(restored.snapshot(), vec!["three", "four", "five"]);
}

#[tokio::test]
async fn test_load_keeps_newest_when_file_exceeds_capacity() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("history");
    std::fs::write(&path, "a\nb\n\n  \nc\nd\n").unwrap();

    let mut history = HistoryBuffer::new(2).with_path(&path);
    let count = history.load_from_disk().await.unwrap();

    assert_eq!(count, 2);
    assert_eq!(history.snapshot(), vec!["c", "d"]);
}

#[tokio::test]
async fn test_missing_file_loads_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("does-not-exist");

    let mut history = HistoryBuffer::new(5).with_path(&path);
    let count = history.load_from_disk().await.unwrap();

    assert_eq!(count, 0);
    assert!(history.is_empty());
}

#[tokio::test]
async fn test_save_creates_parent_directory() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("dir").join("history");

    let mut history = HistoryBuffer::new(5).with_path(&path);
    history.add("pwd");
    history.save_to_disk().await.unwrap();

    assert!(path.exists());
}

#[tokio::test]
async fn test_unreadable_path_is_error() {
    let temp_dir = TempDir::new().unwrap();

    // 目录不能作为文件读取
    let mut history = HistoryBuffer::new(5).with_path(temp_dir.path());
    let result = history.load_from_disk().await;

    match result {
        Err(HistoryError::Io { path, .. }) => assert_eq!(path, temp_dir.path()),
        other => panic!("expected I/O error, got {other:?}"),
    }
    assert!(history.is_empty());
}
