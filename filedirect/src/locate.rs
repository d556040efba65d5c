//! Outward folder discovery.
//!
//! When a folder is not found at its literal path, [`search_for_folder`]
//! walks the target path's segments from a base directory: for every segment
//! but the last, a matching child directory is descended into and the
//! remaining segments are searched for from there, depth-first with the
//! first successful resolution winning. Only as a last resort is the final
//! segment checked directly inside the current base, which avoids false
//! positives from partial matches. If nothing is found, the whole search is
//! retried exactly once from the filesystem root, marked terminal so it can
//! never loop. This tolerates working directories nested arbitrarily deep
//! relative to the target.

use std::path::Path;

use crate::direct::FilesystemProvider;
use crate::path_util;

/// Locate `folder` starting from `base` (`"."` or empty means the current
/// working directory). Expects sanitized forward-slash input; returns the
/// resolved path with a trailing slash. `terminal` marks the root retry;
/// no further retries happen once it is set.
pub fn search_for_folder<F>(fs: &F, folder: &str, base: &str, terminal: bool) -> Option<String>
where
    F: FilesystemProvider + ?Sized,
{
    let base = if base.is_empty() || base == "." {
        path_util::trail_slash(&fs.cwd()?.to_string_lossy())
    } else {
        // Resolved paths are concatenated onto the base below, so an
        // unslashed caller-supplied base must be normalized too.
        path_util::trail_slash(base)
    };
    let folder = path_util::untrail_slash(folder).to_string();

    if fs.is_verbose() {
        eprintln!("Looking for {folder} in {base}");
    }

    let parts: Vec<&str> = folder.split('/').collect();
    let last_index = parts.len() - 1;
    let last_part = parts[last_index];

    let files = fs.directory_list(Path::new(&base), true, false)?;

    for (index, part) in parts.iter().enumerate() {
        if index == last_index {
            // The final segment is only matched by the last-resort check
            // below.
            continue;
        }
        if !files.contains_key(*part) {
            continue;
        }

        let new_dir = path_util::trail_slash(&path_util::join(&base, part));
        if fs.is_verbose() {
            eprintln!("Changing to {new_dir}");
        }

        // Only the remaining segments are searched below this match, not
        // the full path again.
        let remaining = parts[index + 1..].join("/");
        if let Some(found) = search_for_folder(fs, &remaining, &new_dir, terminal) {
            return Some(found);
        }
    }

    // Last resort; every branch above fails fast when this is the right one.
    if files.contains_key(last_part) {
        let found = path_util::trail_slash(&format!("{base}{last_part}"));
        if fs.is_verbose() {
            eprintln!("Found {found}");
        }
        return Some(found);
    }

    if terminal || base == "/" {
        return None;
    }

    // The working directory may be /home/user while the target hangs off
    // /var/www; one retry from the root covers that.
    search_for_folder(fs, &folder, "/", true)
}
