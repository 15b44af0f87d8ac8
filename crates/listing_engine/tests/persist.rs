use std::fs;

use listing_engine::{ensure_output_dir, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_state_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("state");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn write_replaces_and_read_returns_latest() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    assert_eq!(writer.read("session.ron").unwrap(), None);

    let first = writer.write("session.ron", "(id: \"1\")").unwrap();
    assert_eq!(first.file_name().unwrap(), "session.ron");
    let second = writer.write("session.ron", "(id: \"2\")").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "(id: \"2\")");
    assert_eq!(
        writer.read("session.ron").unwrap().as_deref(),
        Some("(id: \"2\")")
    );
}

#[test]
fn remove_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());
    writer.write("session.ron", "x").unwrap();

    writer.remove("session.ron").unwrap();
    assert!(!writer.path_of("session.ron").exists());
    writer.remove("session.ron").unwrap();
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write("session.ron", "data").is_err());
    assert!(!file_path.with_file_name("session.ron").exists());
}
