use dupesweep::duplicates::{group_by_size, DuplicateFinder, FinderConfig};
use dupesweep::scanner::{FileEntry, HashError, WalkErrorPolicy, WalkerConfig};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_grouping_continues_on_hash_error() {
    let finder = DuplicateFinder::with_defaults();
    let file1 = FileEntry::new(PathBuf::from("nonexistent_1.txt"), 100);
    let file2 = FileEntry::new(PathBuf::from("nonexistent_2.txt"), 100);
    let (buckets, _) = group_by_size(vec![file1, file2]);

    let outcome = finder.group_duplicates(&buckets);

    assert!(outcome.groups.is_empty());
    assert_eq!(outcome.hash_errors.len(), 2);
    for err in &outcome.hash_errors {
        match err {
            HashError::NotFound(_) => {}
            other => panic!("Expected NotFound HashError, got: {:?}", other),
        }
    }
}

#[test]
fn test_unreadable_member_is_left_out_of_its_group() {
    let dir = tempdir().unwrap();
    for name in ["a", "b"] {
        File::create(dir.path().join(name))
            .unwrap()
            .write_all(b"same")
            .unwrap();
    }
    let files = vec![
        FileEntry::new(dir.path().join("a"), 4),
        FileEntry::new(dir.path().join("gone"), 4),
        FileEntry::new(dir.path().join("b"), 4),
    ];
    let (buckets, _) = group_by_size(files);

    let outcome = DuplicateFinder::with_defaults().group_duplicates(&buckets);

    assert_eq!(outcome.groups.len(), 1);
    assert_eq!(outcome.groups[0].files.len(), 2);
    assert_eq!(outcome.hash_errors.len(), 1);
    assert_eq!(outcome.hash_errors[0].path(), dir.path().join("gone"));
    assert_eq!(outcome.hashed_files, 2);
}

#[test]
fn test_clean_scan_has_no_errors() {
    let dir = tempdir().unwrap();
    File::create(dir.path().join("only")).unwrap();

    let config = FinderConfig::default()
        .with_walker_config(WalkerConfig::new(Default::default(), WalkErrorPolicy::Skip));
    let (groups, summary) = DuplicateFinder::new(config)
        .find_duplicates(dir.path())
        .unwrap();

    assert!(groups.is_empty());
    assert!(!summary.has_errors());
}

#[cfg(unix)]
#[test]
fn test_skip_policy_survives_unreadable_directory() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let locked = dir.path().join("locked");
    std::fs::create_dir(&locked).unwrap();
    File::create(locked.join("inner")).unwrap();
    File::create(dir.path().join("visible")).unwrap();
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

    // Root ignores permission bits; nothing to observe there.
    if std::fs::read_dir(&locked).is_ok() {
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let skip = FinderConfig::default()
        .with_walker_config(WalkerConfig::new(Default::default(), WalkErrorPolicy::Skip));
    let scan = DuplicateFinder::new(skip).scan(dir.path());

    let abort = DuplicateFinder::with_defaults().scan(dir.path());

    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();

    let scan = scan.unwrap();
    assert_eq!(scan.stats.total_files, 1);
    assert_eq!(scan.skipped.len(), 1);
    assert!(abort.is_err());
}
