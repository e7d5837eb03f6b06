/// End-to-end scanner integration tests.
///
/// These tests run the real `Scanner` and `start_scan` code paths against a
/// real temporary filesystem: worker pool construction, the OS listing
/// layer, throttled progress, and the background-thread handle.
///
/// Failure injection (access denied, path too long) lives in the walker's
/// unit tests, where an in-memory filesystem makes it deterministic even
/// when the suite runs as root.
use foldersleuth_core::scanner::progress::ScanProgress;
use foldersleuth_core::scanner::{
    scan, start_scan, ScanOptions, Scanner, VisitSink, PROGRESS_CHANNEL_CAPACITY,
};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

// ── Helpers ──────────────────────────────────────────────────────────────────

/// ```text
/// root/
///   a.txt     (100 bytes)
///   sub/
///     b.txt   (50 bytes)
///     c.txt   (150 bytes)
/// ```
fn build_example_tree(root: &Path) {
    let sub = root.join("sub");
    fs::create_dir_all(&sub).unwrap();
    write_bytes(&root.join("a.txt"), 100);
    write_bytes(&sub.join("b.txt"), 50);
    write_bytes(&sub.join("c.txt"), 150);
}

fn write_bytes(path: &Path, n: usize) {
    let mut f = fs::File::create(path).unwrap();
    f.write_all(&vec![0u8; n]).unwrap();
}

fn options(threads: usize) -> ScanOptions {
    ScanOptions {
        threads: Some(threads),
        ..ScanOptions::default()
    }
}

fn summarise(entries: &[foldersleuth_core::FileSystemEntry]) -> Vec<(String, u64, bool)> {
    entries
        .iter()
        .map(|e| (e.name.to_string(), e.size, e.is_dir))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn example_tree_is_sized_and_sorted() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    build_example_tree(tmp.path());

    let result = scan(tmp.path(), None).unwrap();

    assert_eq!(
        summarise(&result.entries),
        vec![("sub".to_string(), 200, true), ("a.txt".to_string(), 100, false)]
    );
    assert_eq!(result.total_size, 300);
    assert_eq!(result.skipped(), 0);
    assert_eq!(result.root, tmp.path());
    assert_eq!(result.entries[0].path, tmp.path().join("sub"));
}

#[test]
fn empty_directory_gives_empty_result() {
    let tmp = TempDir::new().expect("failed to create temp dir");

    let result = scan(tmp.path(), None).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.total_size, 0);
    assert_eq!(result.skipped(), 0);
}

#[test]
fn missing_root_is_skipped_not_fatal() {
    let tmp = TempDir::new().expect("failed to create temp dir");

    let result = scan(&tmp.path().join("does-not-exist"), None).unwrap();
    assert!(result.is_empty());
    assert!(result.skipped() >= 1);
}

#[test]
fn empty_subdirectory_is_listed_with_zero_size() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    fs::create_dir(tmp.path().join("empty")).unwrap();
    write_bytes(&tmp.path().join("f.bin"), 10);

    let result = scan(tmp.path(), None).unwrap();
    assert_eq!(
        summarise(&result.entries),
        vec![("f.bin".to_string(), 10, false), ("empty".to_string(), 0, true)]
    );
}

#[test]
fn entry_sizes_sum_to_tree_total() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let mut expected = 0u64;
    for i in 0..6 {
        let mut dir = tmp.path().join(format!("d{i}"));
        for depth in 0..i {
            dir = dir.join(format!("n{depth}"));
        }
        fs::create_dir_all(&dir).unwrap();
        let n = 10 * (i + 1);
        write_bytes(&dir.join("leaf.bin"), n);
        expected += n as u64;
    }
    write_bytes(&tmp.path().join("top.bin"), 7);
    expected += 7;

    let result = scan(tmp.path(), None).unwrap();
    assert_eq!(result.len(), 7);
    assert_eq!(result.total_size, expected);
    assert_eq!(result.entries.iter().map(|e| e.size).sum::<u64>(), expected);
}

#[test]
fn repeated_scans_are_identical() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    build_example_tree(tmp.path());
    write_bytes(&tmp.path().join("same-size.bin"), 100);

    let first = scan(tmp.path(), None).unwrap();
    let second = scan(tmp.path(), None).unwrap();
    assert_eq!(first.entries.len(), second.entries.len());
    assert_eq!(first.total_size, second.total_size);
    assert_eq!(
        first.entries.iter().map(|e| e.size).collect::<Vec<_>>(),
        second.entries.iter().map(|e| e.size).collect::<Vec<_>>()
    );
}

/// Many top-level directories on a small pool: one entry per child, every
/// time, and the same answer as a single-threaded walk.
#[test]
fn wide_tree_under_small_pool_matches_single_thread() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    for i in 0..60 {
        let dir = tmp.path().join(format!("dir{i:02}"));
        fs::create_dir_all(dir.join("nested")).unwrap();
        write_bytes(&dir.join("a.bin"), i + 1);
        write_bytes(&dir.join("nested").join("b.bin"), 2 * i);
    }

    let reference = Scanner::with_options(options(1)).scan(tmp.path(), None).unwrap();
    let mut expected: Vec<(PathBuf, u64)> = reference
        .entries
        .iter()
        .map(|e| (e.path.clone(), e.size))
        .collect();
    expected.sort();

    let scanner = Scanner::with_options(options(4));
    for _ in 0..10 {
        let result = scanner.scan(tmp.path(), None).unwrap();
        assert_eq!(result.len(), 60);
        assert_eq!(result.skipped(), reference.skipped());
        let mut got: Vec<(PathBuf, u64)> = result
            .entries
            .iter()
            .map(|e| (e.path.clone(), e.size))
            .collect();
        got.sort();
        assert_eq!(got, expected);
    }
}

#[test]
fn visit_callback_sees_paths_under_root() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    build_example_tree(tmp.path());

    let seen = Mutex::new(Vec::new());
    let sink: VisitSink = &|p: &Path| seen.lock().unwrap().push(p.to_path_buf());
    let scanner = Scanner::with_options(ScanOptions {
        threads: Some(2),
        throttle: Duration::ZERO,
    });
    scanner.scan(tmp.path(), Some(sink)).unwrap();

    let seen = seen.into_inner().unwrap();
    // a.txt, sub, sub/b.txt, sub/c.txt
    assert_eq!(seen.len(), 4);
    assert!(seen.iter().all(|p| p.starts_with(tmp.path())));
    assert_eq!(seen[0], tmp.path().join("a.txt"));
}

#[test]
fn background_scan_ends_with_complete() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    build_example_tree(tmp.path());

    let handle = start_scan(tmp.path().to_path_buf(), ScanOptions::default()).unwrap();

    let deadline = std::time::Instant::now() + Duration::from_secs(30);
    let last = loop {
        assert!(
            std::time::Instant::now() < deadline,
            "scanner did not complete within 30 seconds"
        );
        match handle.progress_rx.recv_timeout(Duration::from_millis(100)) {
            Ok(msg) if msg.is_terminal() => break msg,
            Ok(_) => continue,
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => continue,
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
                panic!("scanner channel disconnected before a terminal message")
            }
        }
    };

    match last {
        ScanProgress::Complete {
            entries, skipped, ..
        } => {
            assert_eq!(entries, 2);
            assert_eq!(skipped, 0);
        }
        other => panic!("expected Complete, got {other:?}"),
    }

    let result = handle.wait().unwrap();
    assert_eq!(result.total_size, 300);
}

#[test]
fn wait_without_draining_progress_returns() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    for i in 0..(PROGRESS_CHANNEL_CAPACITY + 144) {
        write_bytes(&tmp.path().join(format!("f{i:03}.bin")), 1);
    }

    let handle = start_scan(
        tmp.path().to_path_buf(),
        ScanOptions {
            threads: Some(2),
            throttle: Duration::ZERO,
        },
    )
    .unwrap();

    let (done_tx, done_rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let _ = done_tx.send(handle.wait());
    });
    let result = done_rx
        .recv_timeout(Duration::from_secs(30))
        .expect("wait() blocked on a full progress channel")
        .unwrap();

    assert_eq!(result.len(), PROGRESS_CHANNEL_CAPACITY + 144);
    assert_eq!(result.total_size, (PROGRESS_CHANNEL_CAPACITY + 144) as u64);
}

#[cfg(unix)]
#[test]
fn non_utf8_names_export_lossily() {
    use foldersleuth_core::export::write_json;
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let tmp = TempDir::new().expect("failed to create temp dir");
    let name = OsStr::from_bytes(b"bad\xff.bin");
    if fs::File::create(tmp.path().join(name)).is_err() {
        // Filesystems that enforce UTF-8 names (e.g. some macOS volumes).
        return;
    }

    let result = scan(tmp.path(), None).unwrap();
    assert_eq!(result.len(), 1);

    let mut buf = Vec::new();
    write_json(&result, &mut buf).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    let path = value["entries"][0]["path"].as_str().unwrap();
    assert!(path.ends_with("bad\u{FFFD}.bin"), "got {path}");
    assert_eq!(value["entries"][0]["name"], "bad\u{FFFD}.bin");
}

const _: () = assert!(
    PROGRESS_CHANNEL_CAPACITY > 0,
    "PROGRESS_CHANNEL_CAPACITY must be > 0"
);
