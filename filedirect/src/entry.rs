//! The [`PathEntry`] data model: one filesystem node as observed during a
//! directory listing, with permission, ownership, size and timestamp
//! metadata resolved at listing time.

use serde::Serialize;
use std::collections::BTreeMap;

/// Kind of a listed node, resolved at listing time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryKind {
    #[serde(rename = "file")]
    File,
    #[serde(rename = "directory")]
    Directory,
}

/// One node of a directory listing.
///
/// `children` is `Some` only for directories: empty unless a recursive
/// listing was explicitly requested, in which case it holds the nested
/// listing keyed by child name.
#[derive(Debug, Clone, Serialize)]
pub struct PathEntry {
    pub name: String,
    #[serde(rename = "permissionSymbolic")]
    pub permission_h: String,
    pub permission: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub uid: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub gid: u32,
    pub size: u64,
    #[serde(rename = "lastModified")]
    pub last_modified: i64,
    pub kind: EntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<BTreeMap<String, PathEntry>>,
}

impl PathEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}
