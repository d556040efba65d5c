//! The [`FilesystemProvider`] capability trait and its local-disk
//! implementation [`FilesystemDirect`].
//!
//! Every operation checks its preconditions explicitly and reports expected,
//! recoverable conditions (missing file, permission denied, refused
//! overwrite) as `false`/`None` rather than an error; callers must check
//! return values. Recursive variants are best-effort: a failing child does
//! not stop its siblings, and the aggregate result reflects whether any step
//! failed. There are no retries anywhere.

use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File, OpenOptions, Permissions};
use std::io::{Read, Write};
use std::os::unix::fs::{self as unix_fs, MetadataExt, PermissionsExt};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use filetime::FileTime;

use crate::entry::{EntryKind, PathEntry};
use crate::locate;
use crate::owners::OwnerDb;
use crate::path_util;
use crate::perms;

/// Chunk size for large writes.
const WRITE_CHUNK: usize = 4096;

/// Capability interface over a filesystem backend.
///
/// [`FilesystemDirect`] is the local-disk implementation; a remote backend
/// (FTP and friends) would plug in through the same interface instead of
/// subclassing anything.
pub trait FilesystemProvider {
    /// Whether the path exists at all.
    fn exists(&self, path: &Path) -> bool;

    /// Whether the path exists and is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Whether the path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Whether the path can actually be opened (or enumerated) for reading.
    fn is_readable(&self, path: &Path) -> bool;

    /// Whether the path can actually be written to. Permission bits alone
    /// cannot answer this without the effective uid, so implementations
    /// probe instead of inspecting the mode.
    fn is_writable(&self, path: &Path) -> bool;

    /// Read a file's contents, optionally limited to `length` bytes.
    /// `None` if the path is not a readable file or `length` is zero.
    fn get_contents(&self, path: &Path, length: Option<u64>) -> Option<Vec<u8>>;

    /// Read a text file as lines.
    fn get_contents_as_lines(&self, path: &Path) -> Option<Vec<String>>;

    /// Write `data` to `path`, chunked for large payloads, verifying that
    /// every byte landed, then apply `mode` (default 0644). Directories are
    /// rejected as targets.
    fn write_content(&self, path: &Path, data: &[u8], mode: Option<u32>) -> bool;

    /// Copy `source` to `destination`. Refuses to overwrite unless allowed.
    fn copy(&self, source: &Path, destination: &Path, overwrite: bool, mode: Option<u32>) -> bool;

    /// Move `source` to `destination`: atomic rename first, falling back to
    /// copy plus delete-source when rename fails (e.g. across devices).
    fn move_path(&self, source: &Path, destination: &Path, overwrite: bool) -> bool;

    /// Delete a path. An empty path is refused outright (some filesystems
    /// report it as `/`, which would recursively delete everything).
    /// Recursive directory deletion is best-effort across siblings.
    fn delete(&self, path: &Path, recursive: bool, kind: Option<EntryKind>) -> bool;

    /// Change permissions, defaulting to 0644 for files and 0755 for
    /// directories. `recursive` applies the same mode to every entry below.
    fn ch_mod(&self, path: &Path, mode: Option<u32>, recursive: bool) -> bool;

    /// Change the owner, given a user name or numeric id.
    fn ch_own(&self, path: &Path, owner: &str, recursive: bool) -> bool;

    /// Change the group, given a group name or numeric id.
    fn ch_grp(&self, path: &Path, group: &str, recursive: bool) -> bool;

    /// Create a directory. Trailing separators are stripped first; an empty
    /// path is rejected. Mode defaults to 0755; ownership changes are
    /// chained after creation when requested.
    fn mk_dir(&self, path: &Path, mode: Option<u32>, owner: Option<&str>, group: Option<&str>)
        -> bool;

    /// Remove a directory, recursively if asked.
    fn rm_dir(&self, path: &Path, recursive: bool) -> bool;

    /// Create the file if missing, then set its access and modification
    /// times (now unless given).
    fn touch(&self, path: &Path, mtime: Option<SystemTime>, atime: Option<SystemTime>) -> bool;

    /// List a directory as a name -> [`PathEntry`] mapping. A file path
    /// lists only that file's entry within its parent. `.`/`..` are always
    /// skipped, dot entries only when `include_hidden` is false. Child
    /// listings are populated only when `recursive` is set.
    fn directory_list(
        &self,
        path: &Path,
        include_hidden: bool,
        recursive: bool,
    ) -> Option<BTreeMap<String, PathEntry>>;

    /// Owner account name (or the numeric uid rendered as text when it has
    /// no passwd entry).
    fn owner(&self, path: &Path) -> Option<String>;

    /// Group name (or the numeric gid rendered as text).
    fn group(&self, path: &Path) -> Option<String>;

    /// Full file mode including filetype bits.
    fn get_ch_mod(&self, path: &Path) -> Option<u32>;

    /// Last access time, seconds since the epoch.
    fn a_time(&self, path: &Path) -> Option<i64>;

    /// Last modification time, seconds since the epoch.
    fn m_time(&self, path: &Path) -> Option<i64>;

    /// Size in bytes.
    fn size(&self, path: &Path) -> Option<u64>;

    /// Current working directory.
    fn cwd(&self) -> Option<PathBuf>;

    /// Change the working directory; `false` unless `path` is a directory.
    fn ch_dir(&self, path: &Path) -> bool;

    /// Resolve a folder path, consulting the instance cache and falling
    /// back to [`locate::search_for_folder`]. Resolved paths are normalized
    /// to forward slashes with a trailing separator.
    fn find_folder(&mut self, folder: &str) -> Option<String>;

    /// Whether folder discovery should trace its steps on stderr.
    fn is_verbose(&self) -> bool {
        false
    }

    /// Symbolic permission string for a path.
    fn get_h_ch_mod(&self, path: &Path) -> Option<String> {
        self.get_ch_mod(path).map(perms::to_symbolic)
    }

    /// Octal mode recovered from a symbolic permission string.
    fn get_num_from_h_ch_mod(&self, symbolic: &str) -> u32 {
        perms::to_octal(symbolic)
    }
}

/// Whether a payload contains bytes outside the printable ASCII range.
pub fn is_binary(data: &[u8]) -> bool {
    data.iter().any(|b| !(0x20..=0x7E).contains(b))
}

/// Local-disk [`FilesystemProvider`].
///
/// Owns the folder-resolution cache for its own lifetime; the cache is never
/// invalidated. Not thread-safe, by the single-threaded request model of
/// the callers.
#[derive(Debug, Default)]
pub struct FilesystemDirect {
    cache: HashMap<String, String>,
    /// Emit a trace of folder discovery steps on stderr.
    pub verbose: bool,
}

impl FilesystemDirect {
    pub fn new() -> FilesystemDirect {
        FilesystemDirect::default()
    }

    fn resolve_uid(&self, owner: &str) -> Option<u32> {
        owner
            .parse::<u32>()
            .ok()
            .or_else(|| OwnerDb::load().user_id(owner))
    }

    fn resolve_gid(&self, group: &str) -> Option<u32> {
        group
            .parse::<u32>()
            .ok()
            .or_else(|| OwnerDb::load().group_id(group))
    }

    fn apply_owner(&self, path: &Path, uid: Option<u32>, gid: Option<u32>, recursive: bool) -> bool {
        if !self.exists(path) {
            return false;
        }
        if !recursive || !self.is_dir(path) {
            return unix_fs::chown(path, uid, gid).is_ok();
        }
        let mut ok = unix_fs::chown(path, uid, gid).is_ok();
        if let Some(list) = self.directory_list(path, true, false) {
            for name in list.keys() {
                if !self.apply_owner(&path.join(name), uid, gid, recursive) {
                    ok = false;
                }
            }
        }
        ok
    }

    fn list_inner(
        &self,
        path: &Path,
        include_hidden: bool,
        recursive: bool,
        db: &OwnerDb,
    ) -> Option<BTreeMap<String, PathEntry>> {
        // A file path limits the listing to that single entry in its parent.
        let (dir, limit) = if self.is_file(path) {
            let name = path.file_name()?.to_string_lossy().into_owned();
            (path.parent()?.to_path_buf(), Some(name))
        } else {
            (path.to_path_buf(), None)
        };

        if !self.is_dir(&dir) {
            return None;
        }

        let mut ret = BTreeMap::new();
        for dirent in fs::read_dir(&dir).ok()?.flatten() {
            let name = dirent.file_name().to_string_lossy().into_owned();
            if !include_hidden && name.starts_with('.') {
                continue;
            }
            if let Some(ref only) = limit {
                if &name != only {
                    continue;
                }
            }

            let full = dir.join(&name);
            // Follow symlinks like the stat family does; a broken link still
            // gets listed with its own metadata.
            let meta = match fs::metadata(&full).or_else(|_| fs::symlink_metadata(&full)) {
                Ok(meta) => meta,
                Err(_) => continue,
            };

            let mode = meta.mode();
            let kind = if meta.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            let children = match kind {
                EntryKind::Directory if recursive => Some(
                    self.list_inner(&full, include_hidden, recursive, db)
                        .unwrap_or_default(),
                ),
                EntryKind::Directory => Some(BTreeMap::new()),
                EntryKind::File => None,
            };

            ret.insert(
                name.clone(),
                PathEntry {
                    name,
                    permission_h: perms::to_symbolic(mode),
                    permission: mode & 0o7777,
                    owner: db.user_name(meta.uid()).map(str::to_string),
                    uid: meta.uid(),
                    group: db.group_name(meta.gid()).map(str::to_string),
                    gid: meta.gid(),
                    size: meta.len(),
                    last_modified: meta.mtime(),
                    kind,
                    children,
                },
            );
        }
        Some(ret)
    }
}

impl FilesystemProvider for FilesystemDirect {
    fn is_verbose(&self) -> bool {
        self.verbose
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_readable(&self, path: &Path) -> bool {
        if self.is_dir(path) {
            fs::read_dir(path).is_ok()
        } else {
            File::open(path).is_ok()
        }
    }

    fn is_writable(&self, path: &Path) -> bool {
        if !self.exists(path) {
            return false;
        }
        if self.is_dir(path) {
            let probe = path.join(format!(".write_probe_{}", std::process::id()));
            match OpenOptions::new().create_new(true).write(true).open(&probe) {
                Ok(_) => {
                    let _ = fs::remove_file(&probe);
                    true
                }
                Err(_) => false,
            }
        } else {
            OpenOptions::new().append(true).open(path).is_ok()
        }
    }

    fn get_contents(&self, path: &Path, length: Option<u64>) -> Option<Vec<u8>> {
        if !self.is_file(path) || !self.is_readable(path) {
            return None;
        }
        match length {
            None => fs::read(path).ok(),
            Some(0) => None,
            Some(limit) => {
                let file = File::open(path).ok()?;
                let mut buffer = Vec::new();
                file.take(limit).read_to_end(&mut buffer).ok()?;
                Some(buffer)
            }
        }
    }

    fn get_contents_as_lines(&self, path: &Path) -> Option<Vec<String>> {
        let data = self.get_contents(path, None)?;
        let text = String::from_utf8(data).ok()?;
        Some(text.lines().map(str::to_string).collect())
    }

    fn write_content(&self, path: &Path, data: &[u8], mode: Option<u32>) -> bool {
        if self.is_dir(path) {
            return false;
        }
        let mut file = match File::create(path) {
            Ok(file) => file,
            Err(_) => return false,
        };

        let mut written = 0usize;
        for chunk in data.chunks(WRITE_CHUNK) {
            if file.write_all(chunk).is_err() {
                break;
            }
            written += chunk.len();
        }
        if written != data.len() || file.flush().is_err() {
            return false;
        }
        drop(file);

        let _ = self.ch_mod(path, mode, false);
        true
    }

    fn copy(&self, source: &Path, destination: &Path, overwrite: bool, mode: Option<u32>) -> bool {
        if !overwrite && self.exists(destination) {
            return false;
        }
        let ret = fs::copy(source, destination).is_ok();
        if ret {
            if let Some(mode) = mode {
                let _ = self.ch_mod(destination, Some(mode), false);
            }
        }
        ret
    }

    fn move_path(&self, source: &Path, destination: &Path, overwrite: bool) -> bool {
        if !overwrite && self.exists(destination) {
            return false;
        }
        if fs::rename(source, destination).is_ok() {
            return true;
        }
        if self.copy(source, destination, overwrite, None) && self.exists(destination) {
            self.delete(source, false, None);
            true
        } else {
            false
        }
    }

    fn delete(&self, path: &Path, recursive: bool, kind: Option<EntryKind>) -> bool {
        if path.as_os_str().is_empty() {
            return false;
        }
        if kind == Some(EntryKind::File) || self.is_file(path) {
            return fs::remove_file(path).is_ok();
        }
        if !recursive {
            return fs::remove_dir(path).is_ok();
        }

        let mut ok = true;
        if let Some(list) = self.directory_list(path, true, false) {
            for (name, info) in list {
                if !self.delete(&path.join(&name), recursive, Some(info.kind)) {
                    ok = false;
                }
            }
        }
        if self.exists(path) && fs::remove_dir(path).is_err() {
            ok = false;
        }
        ok
    }

    fn ch_mod(&self, path: &Path, mode: Option<u32>, recursive: bool) -> bool {
        let mode = match mode {
            Some(mode) => mode,
            None if self.is_file(path) => perms::CHMOD_FILE,
            None if self.is_dir(path) => perms::CHMOD_DIR,
            None => return false,
        };

        if !recursive || !self.is_dir(path) {
            return fs::set_permissions(path, Permissions::from_mode(mode)).is_ok();
        }

        let mut ok = true;
        if let Some(list) = self.directory_list(path, true, false) {
            for name in list.keys() {
                if !self.ch_mod(&path.join(name), Some(mode), recursive) {
                    ok = false;
                }
            }
        }
        if fs::set_permissions(path, Permissions::from_mode(mode)).is_err() {
            ok = false;
        }
        ok
    }

    fn ch_own(&self, path: &Path, owner: &str, recursive: bool) -> bool {
        let uid = match self.resolve_uid(owner) {
            Some(uid) => uid,
            None => return false,
        };
        self.apply_owner(path, Some(uid), None, recursive)
    }

    fn ch_grp(&self, path: &Path, group: &str, recursive: bool) -> bool {
        let gid = match self.resolve_gid(group) {
            Some(gid) => gid,
            None => return false,
        };
        self.apply_owner(path, None, Some(gid), recursive)
    }

    fn mk_dir(
        &self,
        path: &Path,
        mode: Option<u32>,
        owner: Option<&str>,
        group: Option<&str>,
    ) -> bool {
        // Trailing separators break creation on some platforms.
        let text = path.to_string_lossy();
        let cleaned = path_util::untrail_slash(&text);
        if cleaned.is_empty() {
            return false;
        }
        let path = Path::new(cleaned);

        if fs::create_dir(path).is_err() {
            return false;
        }
        let _ = self.ch_mod(path, Some(mode.unwrap_or(perms::CHMOD_DIR)), false);
        if let Some(owner) = owner {
            self.ch_own(path, owner, false);
        }
        if let Some(group) = group {
            self.ch_grp(path, group, false);
        }
        true
    }

    fn rm_dir(&self, path: &Path, recursive: bool) -> bool {
        self.delete(path, recursive, None)
    }

    fn touch(&self, path: &Path, mtime: Option<SystemTime>, atime: Option<SystemTime>) -> bool {
        if !self.exists(path)
            && OpenOptions::new()
                .create(true)
                .write(true)
                .open(path)
                .is_err()
        {
            return false;
        }
        let now = SystemTime::now();
        let atime = FileTime::from_system_time(atime.unwrap_or(now));
        let mtime = FileTime::from_system_time(mtime.unwrap_or(now));
        filetime::set_file_times(path, atime, mtime).is_ok()
    }

    fn directory_list(
        &self,
        path: &Path,
        include_hidden: bool,
        recursive: bool,
    ) -> Option<BTreeMap<String, PathEntry>> {
        let db = OwnerDb::load();
        self.list_inner(path, include_hidden, recursive, &db)
    }

    fn owner(&self, path: &Path) -> Option<String> {
        let meta = fs::metadata(path).ok()?;
        let uid = meta.uid();
        Some(
            OwnerDb::load()
                .user_name(uid)
                .map(str::to_string)
                .unwrap_or_else(|| uid.to_string()),
        )
    }

    fn group(&self, path: &Path) -> Option<String> {
        let meta = fs::metadata(path).ok()?;
        let gid = meta.gid();
        Some(
            OwnerDb::load()
                .group_name(gid)
                .map(str::to_string)
                .unwrap_or_else(|| gid.to_string()),
        )
    }

    fn get_ch_mod(&self, path: &Path) -> Option<u32> {
        fs::metadata(path).ok().map(|meta| meta.mode())
    }

    fn a_time(&self, path: &Path) -> Option<i64> {
        fs::metadata(path).ok().map(|meta| meta.atime())
    }

    fn m_time(&self, path: &Path) -> Option<i64> {
        fs::metadata(path).ok().map(|meta| meta.mtime())
    }

    fn size(&self, path: &Path) -> Option<u64> {
        fs::metadata(path).ok().map(|meta| meta.len())
    }

    fn cwd(&self) -> Option<PathBuf> {
        std::env::current_dir().ok()
    }

    fn ch_dir(&self, path: &Path) -> bool {
        self.is_dir(path) && std::env::set_current_dir(path).is_ok()
    }

    fn find_folder(&mut self, folder: &str) -> Option<String> {
        if let Some(hit) = self.cache.get(folder) {
            return Some(hit.clone());
        }

        let sanitized = path_util::to_unix(folder);
        if let Some(hit) = self.cache.get(&sanitized) {
            return Some(hit.clone());
        }

        if self.exists(Path::new(&sanitized)) {
            let resolved = path_util::trail_slash(&sanitized);
            self.cache.insert(sanitized, resolved.clone());
            return Some(resolved);
        }

        let found = locate::search_for_folder(self, &sanitized, ".", false);
        if let Some(ref resolved) = found {
            self.cache.insert(sanitized, resolved.clone());
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_detection() {
        assert!(!is_binary(b"plain ascii text"));
        assert!(is_binary(b"line\nbreaks count as binary"));
        assert!(is_binary(&[0x00, 0x01, 0x02]));
    }

    #[test]
    fn delete_refuses_empty_path() {
        // Some filesystems report an empty path as /, which would turn a
        // recursive delete into a wipe of everything below the root.
        let fs = FilesystemDirect::new();
        assert!(!fs.delete(Path::new(""), true, None));
    }
}
