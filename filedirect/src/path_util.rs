//! String-level path normalization used by folder discovery and the
//! session store. Resolved folder paths always carry forward slashes and a
//! single trailing separator.

/// Sanitize Windows-style input: backslashes become forward slashes and a
/// leading drive letter (`C:`) is stripped.
pub fn to_unix(path: &str) -> String {
    let path = path.replace('\\', "/");
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
        path[2..].to_string()
    } else {
        path
    }
}

/// Strip any trailing separators.
pub fn untrail_slash(path: &str) -> &str {
    path.trim_end_matches(|c| c == '/' || c == '\\')
}

/// Normalize to exactly one trailing slash.
pub fn trail_slash(path: &str) -> String {
    format!("{}/", untrail_slash(path))
}

/// Join a base directory and a child name with a single separator.
pub fn join(base: &str, name: &str) -> String {
    format!("{}/{}", untrail_slash(base), name.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_unix_strips_drive_letter_and_backslashes() {
        assert_eq!(to_unix(r"C:\var\www"), "/var/www");
        assert_eq!(to_unix(r"d:\data"), "/data");
        assert_eq!(to_unix("/var/www"), "/var/www");
    }

    #[test]
    fn trailing_slash_normalization() {
        assert_eq!(untrail_slash("/tmp/x/"), "/tmp/x");
        assert_eq!(untrail_slash("/tmp/x///"), "/tmp/x");
        assert_eq!(trail_slash("/tmp/x"), "/tmp/x/");
        assert_eq!(trail_slash("/tmp/x///"), "/tmp/x/");
    }

    #[test]
    fn join_collapses_separators() {
        assert_eq!(join("/tmp/", "x"), "/tmp/x");
        assert_eq!(join("/tmp", "/x"), "/tmp/x");
    }
}
