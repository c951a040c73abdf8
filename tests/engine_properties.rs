//! Counting results must not depend on worker count, claim order or history

use charcount::count::{CharCounts, CountingEngine, FileSet, SequentialCounter, is_excluded};
use charcount::generate::{GenerateOptions, generate_fixtures};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const WORKER_COUNTS: [usize; 7] = [1, 2, 4, 8, 16, 32, 64];

fn fixture_dir(files: usize, seed: u64) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let options = GenerateOptions {
        files,
        min_size: 200,
        max_size: 2_000,
        seed: Some(seed),
    };
    generate_fixtures(temp_dir.path(), &options).unwrap();
    temp_dir
}

fn count(dir: &Path, workers: usize) -> CharCounts {
    CountingEngine::new().run(dir, workers).unwrap().counts
}

fn key_wise_sum(left: &CharCounts, right: &CharCounts) -> CharCounts {
    let mut sum = left.clone();
    for (&ch, &n) in right {
        *sum.entry(ch).or_insert(0) += n;
    }
    sum
}

#[test]
fn test_order_independence_across_worker_counts() {
    let dir = fixture_dir(40, 11);
    let expected = SequentialCounter::new().run(dir.path()).unwrap().counts;
    assert!(!expected.is_empty());

    for workers in WORKER_COUNTS {
        assert_eq!(count(dir.path(), workers), expected, "mismatch with {workers} workers");
    }
}

#[test]
fn test_exactly_once_claims() {
    let dir = fixture_dir(25, 5);
    let mut engine = CountingEngine::new();

    for workers in WORKER_COUNTS {
        let report = engine.run(dir.path(), workers).unwrap();
        assert_eq!(engine.cursor().claimed(), 25);
        assert_eq!(report.files_counted + report.files_failed, 25);

        // Every byte of every file was read exactly once
        let bytes: u64 = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().metadata().unwrap().len())
            .sum();
        assert_eq!(report.bytes_processed, bytes);
    }
}

#[test]
fn test_excluded_characters_never_reported() {
    let dir = fixture_dir(10, 99);
    let counts = count(dir.path(), 4);
    for ch in counts.keys() {
        assert!(!is_excluded(*ch as u8), "excluded character {ch:?} was counted");
    }
    assert!(!counts.contains_key(&' '));
    assert!(!counts.contains_key(&'\n'));
}

#[test]
fn test_additivity() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    let both = TempDir::new().unwrap();

    let content_a = "The quick brown fox\njumps over";
    let content_b = "the lazy dog.\r\n\t42!";
    fs::write(a.path().join("a.txt"), content_a).unwrap();
    fs::write(b.path().join("b.txt"), content_b).unwrap();
    fs::write(both.path().join("a.txt"), content_a).unwrap();
    fs::write(both.path().join("b.txt"), content_b).unwrap();

    let sum = key_wise_sum(&count(a.path(), 2), &count(b.path(), 2));
    assert_eq!(count(both.path(), 2), sum);
}

#[test]
fn test_repeated_runs_are_identical() {
    let dir = fixture_dir(15, 21);
    let mut engine = CountingEngine::new();

    let first = engine.run(dir.path(), 8).unwrap();
    let second = engine.run(dir.path(), 8).unwrap();
    assert_eq!(first.counts, second.counts);
    assert_eq!(first.bytes_processed, second.bytes_processed);
}

#[test]
fn test_two_file_scenario() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("1.txt"), "xx").unwrap();
    fs::write(dir.path().join("2.txt"), "xyz").unwrap();

    let expected: CharCounts = [('x', 3), ('y', 1), ('z', 1)].into_iter().collect();
    for workers in [1, 2, 8] {
        assert_eq!(count(dir.path(), workers), expected);
    }
}

#[test]
fn test_empty_directory_completes() {
    let dir = TempDir::new().unwrap();
    for workers in WORKER_COUNTS {
        let report = CountingEngine::new().run(dir.path(), workers).unwrap();
        assert!(report.counts.is_empty());
        assert_eq!(report.files_total, 0);
    }
}

#[test]
fn test_one_unreadable_among_nine() {
    let dir = TempDir::new().unwrap();
    let mut paths = Vec::new();
    for i in 0..9 {
        let path = dir.path().join(format!("{i}.txt"));
        fs::write(&path, "ok!").unwrap();
        paths.push(path);
    }
    // Removed after listing, so opening it fails
    let doomed = dir.path().join("doomed.txt");
    fs::write(&doomed, "zzz").unwrap();
    paths.insert(4, doomed.clone());
    fs::remove_file(&doomed).unwrap();

    for workers in [1, 3, 16] {
        let report = CountingEngine::new()
            .run_file_set(FileSet::from_paths(paths.clone()), workers)
            .unwrap();

        assert_eq!(report.files_failed, 1);
        assert_eq!(report.failures[0].path, doomed);
        assert_eq!(report.files_counted, 9);
        assert_eq!(report.counts.get(&'o'), Some(&9));
        assert_eq!(report.counts.get(&'k'), Some(&9));
        assert_eq!(report.counts.get(&'!'), Some(&9));
        assert!(!report.counts.contains_key(&'z'));
    }
}

#[cfg(unix)]
#[test]
fn test_permission_denied_file_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    for i in 0..9 {
        fs::write(dir.path().join(format!("{i}.txt")), "a").unwrap();
    }
    let locked = dir.path().join("locked.txt");
    fs::write(&locked, "b").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can read it anyway; nothing to check then
    if fs::File::open(&locked).is_ok() {
        return;
    }

    let report = CountingEngine::new().run(dir.path(), 4).unwrap();
    assert_eq!(report.files_failed, 1);
    assert_eq!(report.counts.get(&'a'), Some(&9));
    assert!(!report.counts.contains_key(&'b'));

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
}

#[cfg(unix)]
#[test]
fn test_unresolvable_entries_are_reported_as_failures() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "abc").unwrap();
    let first = dir.path().join("loop-a");
    let second = dir.path().join("loop-b");
    std::os::unix::fs::symlink(&second, &first).unwrap();
    std::os::unix::fs::symlink(&first, &second).unwrap();

    let report = CountingEngine::new().run(dir.path(), 2).unwrap();
    assert_eq!(report.files_total, 3);
    assert_eq!(report.files_counted, 1);
    assert_eq!(report.files_failed, 2);
    assert_eq!(report.counts.get(&'a'), Some(&1));
}
