//! # filedirect
//!
//! Direct local filesystem access in the spirit of the classic "filesystem
//! method" abstractions found in web runtimes: explicit existence checks
//! before every read or mutation, silent `false`/`None` returns for the
//! recoverable cases, and best-effort recursive variants for directory trees.
//!
//! The crate is built from four pieces, leaves first:
//!
//! - [`perms`]: conversion between octal file modes and the 10-character
//!   `-rwxr-xr-x` symbolic rendering.
//! - [`direct`]: the [`direct::FilesystemProvider`] capability trait and its
//!   local-disk implementation [`direct::FilesystemDirect`].
//! - [`locate`]: outward folder discovery for resolving resource paths when
//!   the working directory is nested arbitrarily deep relative to the target.
//! - [`session`]: a file-backed session store implementing the conventional
//!   open/read/write/destroy/gc handler contract, with fingerprint-based
//!   write suppression.
//!
//! Everything is single-threaded, synchronous, blocking I/O. There is no
//! locking discipline; at-most-one-writer-per-session-id is the caller's
//! responsibility.

pub mod direct;
pub mod entry;
pub mod error;
pub mod locate;
pub mod owners;
pub mod path_util;
pub mod perms;
pub mod session;
