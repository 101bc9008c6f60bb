use dupesweep::duplicates::{DuplicateFinder, FinderConfig, FinderError, SortOrder};
use dupesweep::scanner::{ExtensionFilter, WalkErrorPolicy, WalkerConfig};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

fn write(path: &Path, content: &[u8]) {
    File::create(path).unwrap().write_all(content).unwrap();
}

fn finder_for(extension: &str, order: SortOrder) -> DuplicateFinder {
    let config = FinderConfig::default()
        .with_walker_config(WalkerConfig::new(
            ExtensionFilter::new(extension),
            WalkErrorPolicy::Abort,
        ))
        .with_sort_order(order);
    DuplicateFinder::new(config)
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();
    let finder = DuplicateFinder::with_defaults();

    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 0);
    assert_eq!(summary.duplicate_groups, 0);
}

#[test]
fn test_scan_unique_files() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a.txt"), b"content a");
    write(&dir.path().join("b.txt"), b"content b");
    write(&dir.path().join("c.txt"), b"content c");

    let finder = DuplicateFinder::with_defaults();
    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    // Same size, different content: hashed, but no group survives
    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.duplicate_groups, 0);
}

#[test]
fn test_scan_duplicate_files() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a.txt"), b"hello");
    write(&dir.path().join("b.txt"), b"hello");
    write(&dir.path().join("c.txt"), b"world");

    let finder = DuplicateFinder::with_defaults();
    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].size, 5);
    assert_eq!(groups[0].hash_hex(), "5d41402abc4b2a76b9719d911017c592");
    assert_eq!(
        groups[0].files.iter().map(|f| f.path.clone()).collect::<Vec<_>>(),
        vec![dir.path().join("a.txt"), dir.path().join("b.txt")]
    );
    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.duplicate_files, 1);
    assert_eq!(summary.reclaimable_space, 5);
}

#[test]
fn test_scan_nested_directories() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("subdir");
    fs::create_dir(&sub).unwrap();
    write(&dir.path().join("a.txt"), b"dup");
    write(&sub.join("b.txt"), b"dup");

    let finder = DuplicateFinder::with_defaults();
    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].files.len(), 2);
    assert_eq!(summary.total_files, 2);
}

#[test]
fn test_scan_groups_follow_size_order() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("s1.txt"), b"ab");
    write(&dir.path().join("s2.txt"), b"ab");
    write(&dir.path().join("l1.txt"), b"abcdef");
    write(&dir.path().join("l2.txt"), b"abcdef");
    write(&dir.path().join("l3.txt"), b"abcdef");

    let (asc, _) = finder_for("", SortOrder::Ascending)
        .find_duplicates(dir.path())
        .unwrap();
    assert_eq!(asc.iter().map(|g| g.size).collect::<Vec<_>>(), vec![2, 6]);

    let (desc, _) = finder_for("", SortOrder::Descending)
        .find_duplicates(dir.path())
        .unwrap();
    assert_eq!(desc.iter().map(|g| g.size).collect::<Vec<_>>(), vec![6, 2]);
    assert_eq!(desc[0].files.len(), 3);
}

#[test]
fn test_scan_two_hash_groups_in_one_bucket() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a"), b"xxxx");
    write(&dir.path().join("b"), b"yyyy");
    write(&dir.path().join("c"), b"xxxx");
    write(&dir.path().join("d"), b"yyyy");
    write(&dir.path().join("e"), b"zzzz");

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    // Groups appear in the order their first member was seen
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].files[0].path, dir.path().join("a"));
    assert_eq!(groups[1].files[0].path, dir.path().join("b"));
}

#[test]
fn test_scan_extension_filter() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a.txt"), b"same");
    write(&dir.path().join("b.txt"), b"same");
    write(&dir.path().join("c.log"), b"same");
    write(&dir.path().join("d.TXT"), b"same");

    for ext in ["txt", ".txt"] {
        let scan = finder_for(ext, SortOrder::Ascending)
            .scan(dir.path())
            .unwrap();
        assert_eq!(scan.stats.total_files, 2, "filter {ext:?}");
        let files = scan.buckets.get(4).unwrap();
        assert!(files.iter().all(|f| f.path.extension().unwrap() == "txt"));
    }

    let all = finder_for("", SortOrder::Ascending).scan(dir.path()).unwrap();
    assert_eq!(all.stats.total_files, 4);
}

#[test]
fn test_scan_keeps_singleton_buckets() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("one"), b"1");
    write(&dir.path().join("two"), b"22");

    let scan = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    assert_eq!(scan.buckets.len(), 2);
    assert_eq!(scan.buckets.sizes(SortOrder::Descending), vec![2, 1]);
}

#[test]
fn test_scan_empty_files_are_duplicates() {
    let dir = tempdir().unwrap();
    File::create(dir.path().join("e1")).unwrap();
    File::create(dir.path().join("e2")).unwrap();

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].size, 0);
    assert_eq!(groups[0].hash_hex(), "d41d8cd98f00b204e9800998ecf8427e");
}

#[test]
fn test_scan_parallel_matches_sequential() {
    let dir = tempdir().unwrap();
    for i in 0..20 {
        let content = format!("group-{}", i % 4);
        write(&dir.path().join(format!("f{i:02}")), content.as_bytes());
    }

    let (sequential, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();
    let (parallel, _) = DuplicateFinder::new(FinderConfig::default().with_io_threads(4))
        .find_duplicates(dir.path())
        .unwrap();

    let summarize = |groups: &[dupesweep::duplicates::DuplicateGroup]| {
        groups
            .iter()
            .map(|g| (g.hash, g.files.iter().map(|f| f.path.clone()).collect::<Vec<_>>()))
            .collect::<Vec<_>>()
    };
    assert_eq!(sequential.len(), 4);
    assert_eq!(summarize(&sequential), summarize(&parallel));
}

#[test]
fn test_scan_missing_root() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");

    let err = DuplicateFinder::with_defaults().scan(&missing).unwrap_err();
    assert!(matches!(err, FinderError::PathNotFound(p) if p == missing));
}

#[test]
fn test_scan_root_is_a_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("file.txt");
    write(&file, b"x");

    let err = DuplicateFinder::with_defaults().scan(&file).unwrap_err();
    assert!(matches!(err, FinderError::NotADirectory(_)));
}

#[cfg(unix)]
#[test]
fn test_scan_skips_symlinks() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("real"), b"data");
    std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link")).unwrap();

    let scan = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    assert_eq!(scan.stats.total_files, 1);
}
