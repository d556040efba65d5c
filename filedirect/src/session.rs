//! File-backed session storage.
//!
//! One file per session id, hashed into a fixed-length name
//! (`sess_<sha1-hex>`) under `<cache_root>/Session/<save_path>/`. A SHA-256
//! fingerprint of the last payload read or written suppresses redundant
//! writes: an unchanged payload only refreshes the file's modification time
//! so idle-but-unchanged sessions are not garbage collected.
//!
//! The store assumes at most one writer per session id; the fingerprint
//! check is not atomic with the write, so concurrent writers must be
//! serialized by the caller.

use std::path::Path;

use digest::Digest;
use sha1::Sha1;
use sha2::Sha256;

use crate::direct::{FilesystemDirect, FilesystemProvider};
use crate::entry::EntryKind;
use crate::error::{Error, Result};
use crate::path_util;

/// Prefix of every session file name.
pub const SESSION_FILE_PREFIX: &str = "sess_";

/// `sess_` plus 40 hex sha1 characters.
const SESSION_FILE_NAME_LEN: usize = 45;

/// The conventional pluggable session-storage contract of a web runtime's
/// session subsystem.
pub trait SessionHandler {
    /// Resolve (and create if absent) the storage directory for `save_path`
    /// relative to the cache root. Errors loudly when the path exists but
    /// is not a directory, or when creation fails.
    fn open(&mut self, save_path: &str, name: &str) -> Result<bool>;

    /// Idempotent; clears the in-memory session id and existence flag once.
    fn close(&mut self) -> bool;

    /// Read the session payload, recording its fingerprint. A missing
    /// session yields an empty payload and a zero-length placeholder file.
    fn read(&mut self, session_id: &str) -> Vec<u8>;

    /// Persist the payload unless its fingerprint matches the stored one,
    /// in which case only the file's modification time is refreshed.
    fn write(&mut self, session_id: &str, data: &[u8]) -> bool;

    /// Remove the session's file; success when it is already absent.
    fn destroy(&mut self, session_id: &str) -> bool;

    /// Remove session files older than `max_lifetime` seconds.
    fn gc(&mut self, max_lifetime: u64) -> bool;
}

/// File-per-session [`SessionHandler`] over [`FilesystemDirect`].
#[derive(Debug)]
pub struct SessionFileStore {
    fs: FilesystemDirect,
    cache_dir: String,
    save_path: String,
    session_id: Option<String>,
    fingerprint: Option<String>,
    file_exists: bool,
    closed: bool,
}

impl SessionFileStore {
    /// Set up the `Session/` directory under `cache_root`, along with the
    /// `index.html` placeholder and deny-all `.htaccess` marker that keep a
    /// static-file host from exposing the tree.
    pub fn new<P: AsRef<Path>>(cache_root: P) -> Result<SessionFileStore> {
        let fs = FilesystemDirect::new();
        let root = path_util::trail_slash(&cache_root.as_ref().to_string_lossy());
        if !fs.is_writable(Path::new(&root)) {
            return Err(Error::CacheRootUnwritable(root));
        }

        let cache_dir = format!("{root}Session/");
        if fs.exists(Path::new(&cache_dir)) {
            if !fs.is_dir(Path::new(&cache_dir)) {
                return Err(Error::SessionDirectoryInvalid(cache_dir));
            }
        } else if !fs.mk_dir(Path::new(&cache_dir), None, None, None) {
            return Err(Error::SessionDirectoryCreate(cache_dir));
        }

        let index = format!("{cache_dir}index.html");
        if !fs.exists(Path::new(&index)) {
            fs.touch(Path::new(&index), None, None);
        }
        let htaccess = format!("{cache_dir}.htaccess");
        if !fs.exists(Path::new(&htaccess)) {
            fs.write_content(Path::new(&htaccess), b"Deny From All", None);
        }

        Ok(SessionFileStore {
            fs,
            save_path: cache_dir.clone(),
            cache_dir,
            session_id: None,
            fingerprint: None,
            file_exists: false,
            closed: false,
        })
    }

    /// Deterministic file name for a session id.
    fn session_file_name(session_id: &str) -> String {
        let digest = Sha1::digest(session_id.as_bytes());
        format!("{}{}", SESSION_FILE_PREFIX, hex(digest.as_slice()))
    }

    fn fingerprint_of(data: &[u8]) -> String {
        hex(Sha256::digest(data).as_slice())
    }

    /// Full path of the currently open session's file.
    fn session_file(&self) -> Option<String> {
        self.session_id
            .as_ref()
            .map(|id| format!("{}{}", self.save_path, Self::session_file_name(id)))
    }
}

impl SessionHandler for SessionFileStore {
    fn open(&mut self, save_path: &str, _name: &str) -> Result<bool> {
        self.closed = false;
        let target = path_util::trail_slash(&format!("{}{}", self.cache_dir, save_path));
        self.save_path = target.clone();

        if self.fs.exists(Path::new(&target)) {
            if self.fs.is_dir(Path::new(&target)) {
                return Ok(self.fs.is_writable(Path::new(&target)));
            }
            return Err(Error::SessionDirectoryInvalid(target));
        }
        if !self.fs.mk_dir(Path::new(&target), None, None, None) {
            return Err(Error::SessionDirectoryCreate(target));
        }
        Ok(true)
    }

    fn close(&mut self) -> bool {
        if !self.closed {
            self.session_id = None;
            self.file_exists = false;
        }
        self.closed = true;
        true
    }

    fn read(&mut self, session_id: &str) -> Vec<u8> {
        self.session_id = Some(session_id.to_string());
        let file = match self.session_file() {
            Some(file) => file,
            None => return Vec::new(),
        };

        self.file_exists = self.fs.exists(Path::new(&file));
        if self.file_exists {
            let data = self
                .fs
                .get_contents(Path::new(&file), None)
                .unwrap_or_default();
            self.fingerprint = Some(Self::fingerprint_of(&data));
            return data;
        }

        // First sight of this id: leave an empty placeholder behind so the
        // session participates in garbage collection from now on.
        self.file_exists = self.fs.touch(Path::new(&file), None, None);
        self.fingerprint = Some(Self::fingerprint_of(b""));
        Vec::new()
    }

    fn write(&mut self, session_id: &str, data: &[u8]) -> bool {
        // A differing id means the runtime regenerated the session; close
        // the old state and read in the new id first.
        if self.session_id.as_deref() != Some(session_id) {
            if !self.close() {
                return false;
            }
            self.read(session_id);
        }
        self.closed = false;

        let file = match self.session_file() {
            Some(file) => file,
            None => return false,
        };

        let fingerprint = Self::fingerprint_of(data);
        if self.fingerprint.as_deref() == Some(fingerprint.as_str()) {
            // Unchanged payload: skip the write but refresh mtime so the
            // session is not collected while still in use. Only a failed
            // refresh on an existing file is an error.
            return !(self.file_exists && !self.fs.touch(Path::new(&file), None, None));
        }

        if !self.fs.write_content(Path::new(&file), data, None) {
            return false;
        }
        self.fingerprint = Some(fingerprint);
        self.file_exists = true;
        true
    }

    fn destroy(&mut self, session_id: &str) -> bool {
        self.close();
        let file = format!("{}{}", self.save_path, Self::session_file_name(session_id));
        if self.fs.exists(Path::new(&file)) {
            return self.fs.delete(Path::new(&file), false, Some(EntryKind::File));
        }
        true
    }

    fn gc(&mut self, max_lifetime: u64) -> bool {
        let directory = self.save_path.clone();
        if !self.fs.is_dir(Path::new(&directory)) || !self.fs.is_writable(Path::new(&directory)) {
            return false;
        }

        let threshold = chrono::Utc::now().timestamp() - max_lifetime as i64;

        let list = match self.fs.directory_list(Path::new(&directory), false, false) {
            Some(list) => list,
            None => return false,
        };
        for (name, info) in list {
            if name.len() != SESSION_FILE_NAME_LEN
                || !name.starts_with(SESSION_FILE_PREFIX)
                || info.kind != EntryKind::File
            {
                continue;
            }
            if info.last_modified <= threshold {
                let full = format!("{directory}{name}");
                self.fs.delete(Path::new(&full), false, Some(EntryKind::File));
            }
        }
        true
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
