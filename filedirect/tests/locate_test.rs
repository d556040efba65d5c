use std::fs;

use filedirect::direct::{FilesystemDirect, FilesystemProvider};
use filedirect::locate;
use filedirect::path_util;

#[test]
fn find_folder_normalizes_existing_absolute_path() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("www")).unwrap();
    let mut fs_direct = FilesystemDirect::new();

    let unix_style = format!("{}/www", dir.path().display());
    let windows_style = unix_style.replace('/', "\\");

    let resolved = fs_direct.find_folder(&windows_style).unwrap();
    assert_eq!(resolved, path_util::trail_slash(&unix_style));
    assert!(resolved.ends_with("www/"));
    assert!(!resolved.contains('\\'));
}

#[test]
fn find_folder_cache_survives_deletion() {
    // The resolution cache is valid for the instance lifetime and never
    // invalidated.
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("assets")).unwrap();
    let mut fs_direct = FilesystemDirect::new();

    let target = format!("{}/assets", dir.path().display());
    let first = fs_direct.find_folder(&target).unwrap();
    fs::remove_dir(dir.path().join("assets")).unwrap();
    let second = fs_direct.find_folder(&target).unwrap();
    assert_eq!(first, second);
}

#[test]
fn search_descends_through_matching_segments() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("home").join("user");
    fs::create_dir_all(base.join("project").join("resources")).unwrap();
    let fs_direct = FilesystemDirect::new();

    let base_str = path_util::trail_slash(&base.display().to_string());
    let found =
        locate::search_for_folder(&fs_direct, "project/resources", &base_str, true).unwrap();
    assert_eq!(found, format!("{base_str}project/resources/"));
}

#[test]
fn search_finds_final_segment_as_direct_child() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("resources")).unwrap();
    let fs_direct = FilesystemDirect::new();

    let base_str = path_util::trail_slash(&dir.path().display().to_string());
    let found = locate::search_for_folder(&fs_direct, "resources", &base_str, true).unwrap();
    assert_eq!(found, format!("{base_str}resources/"));
}

#[test]
fn search_normalizes_unslashed_base() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("assets")).unwrap();
    let fs_direct = FilesystemDirect::new();

    // A base without its trailing separator must resolve identically.
    let unslashed = dir.path().display().to_string();
    let found = locate::search_for_folder(&fs_direct, "assets", &unslashed, true).unwrap();
    assert_eq!(found, format!("{}assets/", path_util::trail_slash(&unslashed)));
}

#[test]
fn search_gives_up_on_terminal_attempt() {
    let dir = tempfile::tempdir().unwrap();
    let fs_direct = FilesystemDirect::new();

    let base_str = path_util::trail_slash(&dir.path().display().to_string());
    // Terminal attempt: no retry from the filesystem root.
    assert!(locate::search_for_folder(
        &fs_direct,
        "no/such/folder-anywhere-at-all",
        &base_str,
        true
    )
    .is_none());
}
