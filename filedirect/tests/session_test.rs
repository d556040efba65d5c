use std::fs;
use std::path::{Path, PathBuf};

use filedirect::error::Error;
use filedirect::session::{SessionFileStore, SessionHandler, SESSION_FILE_PREFIX};

fn open_store(root: &Path, save_path: &str) -> SessionFileStore {
    let mut store = SessionFileStore::new(root).unwrap();
    assert!(store.open(save_path, "test").unwrap());
    store
}

fn session_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .flatten()
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with(SESSION_FILE_PREFIX))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}

#[test]
fn construction_lays_out_cache_directory() {
    let root = tempfile::tempdir().unwrap();
    let _store = SessionFileStore::new(root.path()).unwrap();

    let session_dir = root.path().join("Session");
    assert!(session_dir.is_dir());
    assert!(session_dir.join("index.html").is_file());
    assert_eq!(fs::metadata(session_dir.join("index.html")).unwrap().len(), 0);
    assert_eq!(
        fs::read(session_dir.join(".htaccess")).unwrap(),
        b"Deny From All".to_vec()
    );
}

#[test]
fn construction_rejects_invalid_session_path() {
    let root = tempfile::tempdir().unwrap();
    // A file squatting where the session directory belongs is a fatal
    // setup error, not a silent false.
    fs::write(root.path().join("Session"), b"not a directory").unwrap();
    match SessionFileStore::new(root.path()) {
        Err(Error::SessionDirectoryInvalid(_)) => {}
        other => panic!("expected SessionDirectoryInvalid, got {other:?}"),
    }
}

#[test]
fn construction_rejects_missing_cache_root() {
    let root = tempfile::tempdir().unwrap();
    let missing = root.path().join("nowhere");
    match SessionFileStore::new(&missing) {
        Err(Error::CacheRootUnwritable(_)) => {}
        other => panic!("expected CacheRootUnwritable, got {other:?}"),
    }
}

#[test]
fn open_creates_save_path_under_session_dir() {
    let root = tempfile::tempdir().unwrap();
    let _store = open_store(root.path(), "app");
    assert!(root.path().join("Session").join("app").is_dir());
}

#[test]
fn read_missing_session_creates_empty_placeholder() {
    let root = tempfile::tempdir().unwrap();
    let mut store = open_store(root.path(), "app");

    assert!(store.read("fresh-session-id").is_empty());

    let dir = root.path().join("Session").join("app");
    let files = session_files(&dir);
    assert_eq!(files.len(), 1);
    // "sess_" plus a 40-character hash.
    assert_eq!(files[0].file_name().unwrap().to_str().unwrap().len(), 45);
    assert_eq!(fs::metadata(&files[0]).unwrap().len(), 0);
}

#[test]
fn unchanged_write_keeps_bytes_but_refreshes_mtime() {
    let root = tempfile::tempdir().unwrap();
    let mut store = open_store(root.path(), "app");
    let dir = root.path().join("Session").join("app");

    store.read("sid");
    assert!(store.write("sid", b"cart=3;user=7"));
    let file = session_files(&dir).remove(0);
    assert_eq!(fs::read(&file).unwrap(), b"cart=3;user=7".to_vec());

    filetime::set_file_mtime(&file, filetime::FileTime::from_unix_time(1_000_000, 0)).unwrap();
    assert!(store.write("sid", b"cart=3;user=7"));
    assert_eq!(fs::read(&file).unwrap(), b"cart=3;user=7".to_vec());
    let mtime = filetime::FileTime::from_last_modification_time(&fs::metadata(&file).unwrap());
    assert!(mtime.unix_seconds() > 1_000_000, "fingerprint-suppressed write must still touch");
}

#[test]
fn changed_write_replaces_content() {
    let root = tempfile::tempdir().unwrap();
    let mut store = open_store(root.path(), "app");
    let dir = root.path().join("Session").join("app");

    store.read("sid");
    assert!(store.write("sid", b"first"));
    assert!(store.write("sid", b"second"));
    let file = session_files(&dir).remove(0);
    assert_eq!(fs::read(&file).unwrap(), b"second".to_vec());
}

#[test]
fn write_with_new_id_reopens_transparently() {
    let root = tempfile::tempdir().unwrap();
    let mut store = open_store(root.path(), "app");
    let dir = root.path().join("Session").join("app");

    store.read("old-id");
    assert!(store.write("old-id", b"old"));
    // Session id regeneration: write under an id we never read.
    assert!(store.write("new-id", b"new"));
    assert_eq!(session_files(&dir).len(), 2);
}

#[test]
fn destroy_is_success_even_when_absent() {
    let root = tempfile::tempdir().unwrap();
    let mut store = open_store(root.path(), "app");
    let dir = root.path().join("Session").join("app");

    store.read("sid");
    assert!(store.write("sid", b"data"));
    assert_eq!(session_files(&dir).len(), 1);

    assert!(store.destroy("sid"));
    assert!(session_files(&dir).is_empty());
    assert!(store.destroy("sid"));
    assert!(store.destroy("never-seen"));
}

#[test]
fn gc_removes_stale_sessions_only() {
    // Stale means mtime at or older than now - lifetime; recently touched
    // sessions must survive collection.
    let root = tempfile::tempdir().unwrap();
    let mut store = open_store(root.path(), "app");
    let dir = root.path().join("Session").join("app");

    store.read("stale");
    assert!(store.write("stale", b"stale data"));
    store.write("fresh", b"fresh data");
    let files = session_files(&dir);
    assert_eq!(files.len(), 2);

    let stale_file = files
        .iter()
        .find(|p| fs::read(p).unwrap() == b"stale data")
        .unwrap();
    filetime::set_file_mtime(stale_file, filetime::FileTime::from_unix_time(1_000_000, 0)).unwrap();

    assert!(store.gc(3600));
    let remaining = session_files(&dir);
    assert_eq!(remaining.len(), 1);
    assert_eq!(fs::read(&remaining[0]).unwrap(), b"fresh data".to_vec());
}

#[test]
fn gc_ignores_unrelated_files() {
    let root = tempfile::tempdir().unwrap();
    let mut store = open_store(root.path(), "app");
    let dir = root.path().join("Session").join("app");

    // Wrong name length, even with the right prefix.
    fs::write(dir.join("sess_short"), b"x").unwrap();
    filetime::set_file_mtime(dir.join("sess_short"), filetime::FileTime::from_unix_time(1, 0))
        .unwrap();

    assert!(store.gc(60));
    assert!(dir.join("sess_short").is_file());
}
