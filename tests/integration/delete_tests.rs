use dupesweep::actions::{delete_by_index, DeleteConfig};
use dupesweep::duplicates::{enumerate, DuplicateFinder, Enumeration};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn write(path: &Path, content: &[u8]) {
    File::create(path).unwrap().write_all(content).unwrap();
}

/// a.txt and b.txt are identical; c.txt has the same size but other bytes.
fn abc_fixture() -> (TempDir, Enumeration) {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a.txt"), b"hello world\n");
    write(&dir.path().join("b.txt"), b"hello world\n");
    write(&dir.path().join("c.txt"), b"HELLO WORLD\n");

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();
    let enumeration = enumerate(&groups);
    (dir, enumeration)
}

#[test]
fn test_enumeration_of_fixture() {
    let (dir, enumeration) = abc_fixture();

    assert_eq!(enumeration.index.len(), 2);
    assert_eq!(enumeration.index.get(1).unwrap().path, dir.path().join("a.txt"));
    assert_eq!(enumeration.index.get(2).unwrap().path, dir.path().join("b.txt"));

    let report = enumeration.render();
    assert!(report.starts_with("12 bytes\nHash: "));
    assert!(report.contains(&format!("1. {}", dir.path().join("a.txt").display())));
    assert!(report.contains(&format!("2. {}", dir.path().join("b.txt").display())));
    assert!(!report.contains("c.txt"));
}

#[test]
fn test_delete_second_copy() {
    let (dir, enumeration) = abc_fixture();

    let result = delete_by_index(&enumeration.index, &[2], &DeleteConfig::permanent());

    assert_eq!(result.bytes_freed, 12);
    assert_eq!(result.success_count(), 1);
    assert!(dir.path().join("a.txt").exists());
    assert!(!dir.path().join("b.txt").exists());
    assert!(dir.path().join("c.txt").exists());
}

#[test]
fn test_delete_ignores_out_of_range_numbers() {
    let (dir, enumeration) = abc_fixture();

    let result = delete_by_index(
        &enumeration.index,
        &[0, -1, 3, 99],
        &DeleteConfig::permanent(),
    );

    assert_eq!(result.bytes_freed, 0);
    assert_eq!(result.skipped, vec![0, -1, 3, 99]);
    assert!(result.failures.is_empty());
    assert!(dir.path().join("a.txt").exists());
    assert!(dir.path().join("b.txt").exists());
}

#[test]
fn test_delete_mixed_valid_and_invalid() {
    let (dir, enumeration) = abc_fixture();

    let result = delete_by_index(&enumeration.index, &[7, 1], &DeleteConfig::permanent());

    assert_eq!(result.skipped, vec![7]);
    assert_eq!(result.bytes_freed, 12);
    assert!(!dir.path().join("a.txt").exists());
}

#[test]
fn test_delete_uses_current_size() {
    let (dir, enumeration) = abc_fixture();
    write(&dir.path().join("b.txt"), b"grown since the scan, much larger now");

    let result = delete_by_index(&enumeration.index, &[2], &DeleteConfig::permanent());

    assert_eq!(result.bytes_freed, 37);
}

#[test]
fn test_delete_continues_after_failure() {
    let (dir, enumeration) = abc_fixture();
    fs::remove_file(dir.path().join("a.txt")).unwrap();

    let result = delete_by_index(&enumeration.index, &[1, 2], &DeleteConfig::permanent());

    assert_eq!(result.failure_count(), 1);
    assert_eq!(result.failures[0].0, dir.path().join("a.txt"));
    assert_eq!(result.success_count(), 1);
    assert_eq!(result.bytes_freed, 12);
    assert!(!dir.path().join("b.txt").exists());
}

#[test]
fn test_delete_same_number_twice() {
    let (_dir, enumeration) = abc_fixture();

    let result = delete_by_index(&enumeration.index, &[1, 1], &DeleteConfig::permanent());

    assert_eq!(result.success_count(), 1);
    assert_eq!(result.failure_count(), 1);
    assert_eq!(result.bytes_freed, 12);
}

#[test]
fn test_delete_nothing_requested() {
    let (_dir, enumeration) = abc_fixture();

    let result = delete_by_index(&enumeration.index, &[], &DeleteConfig::permanent());

    assert_eq!(result.bytes_freed, 0);
    assert!(result.all_succeeded());
}
