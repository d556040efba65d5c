//! Conversion between octal file modes and symbolic `-rwxr-xr-x` strings.
//!
//! `to_symbolic` renders the full 10-character form: one filetype marker
//! followed by three rwx triples, honoring setuid/setgid/sticky. `to_octal`
//! is the lenient inverse: unrecognized characters are discarded and short
//! input is left-padded with `-`, so malformed strings degrade to zero bits
//! instead of erroring. Well-formed strings round-trip exactly.

/// Default mode for files when none is given.
pub const CHMOD_FILE: u32 = 0o644;

/// Default mode for directories when none is given.
pub const CHMOD_DIR: u32 = 0o755;

/// World-open mode.
pub const CHMOD_ALL: u32 = 0o777;

/// Render a file mode (including its filetype bits, if present) as the
/// 10-character symbolic permission string.
pub fn to_symbolic(mode: u32) -> String {
    let mut info = String::with_capacity(10);

    info.push(if mode & 0xC000 == 0xC000 {
        's' // socket
    } else if mode & 0xA000 == 0xA000 {
        'l' // symbolic link
    } else if mode & 0x8000 == 0x8000 {
        '-' // regular file
    } else if mode & 0x6000 == 0x6000 {
        'b' // block special
    } else if mode & 0x4000 == 0x4000 {
        'd' // directory
    } else if mode & 0x2000 == 0x2000 {
        'c' // character special
    } else if mode & 0x1000 == 0x1000 {
        'p' // FIFO pipe
    } else {
        'u' // unknown
    });

    // Owner
    info.push(if mode & 0o400 != 0 { 'r' } else { '-' });
    info.push(if mode & 0o200 != 0 { 'w' } else { '-' });
    info.push(execute_char(mode & 0o100 != 0, mode & 0o4000 != 0, 's', 'S'));

    // Group
    info.push(if mode & 0o040 != 0 { 'r' } else { '-' });
    info.push(if mode & 0o020 != 0 { 'w' } else { '-' });
    info.push(execute_char(mode & 0o010 != 0, mode & 0o2000 != 0, 's', 'S'));

    // World
    info.push(if mode & 0o004 != 0 { 'r' } else { '-' });
    info.push(if mode & 0o002 != 0 { 'w' } else { '-' });
    info.push(execute_char(mode & 0o001 != 0, mode & 0o1000 != 0, 't', 'T'));

    info
}

fn execute_char(execute: bool, special: bool, lower: char, upper: char) -> char {
    match (execute, special) {
        (true, true) => lower,
        (true, false) => 'x',
        (false, true) => upper,
        (false, false) => '-',
    }
}

/// Convert a symbolic permission string back to its octal mode.
///
/// Unrecognized characters (including the leading filetype marker) are
/// discarded; anything shorter than nine permission cells is left-padded
/// with `-`. Per triad, `r` contributes 4, `w` 2 and `x` 1; `s`/`t` add the
/// corresponding special bit on top of the execute bit, `S`/`T` add only the
/// special bit. Never errors; garbage degrades to `0` bits.
pub fn to_octal(symbolic: &str) -> u32 {
    let kept: Vec<char> = symbolic
        .chars()
        .filter(|c| matches!(c, 'r' | 'w' | 'x' | 's' | 'S' | 't' | 'T' | '-'))
        .collect();

    // A well-formed string keeps ten cells here (the filetype `-` of a
    // regular file survives the filter); only the last nine are triads.
    let tail = if kept.len() > 9 {
        &kept[kept.len() - 9..]
    } else {
        &kept[..]
    };

    let mut cells = ['-'; 9];
    let offset = 9 - tail.len();
    cells[offset..].copy_from_slice(tail);

    let mut mode = 0u32;
    for (index, cell) in cells.iter().enumerate() {
        let triad = index / 3;
        let shift = 6 - 3 * triad as u32;
        let value = match cell {
            'r' => 4,
            'w' => 2,
            'x' | 's' | 't' => 1,
            _ => 0,
        };
        mode |= value << shift;
        if matches!(cell, 's' | 'S' | 't' | 'T') {
            mode |= match triad {
                0 => 0o4000,
                1 => 0o2000,
                _ => 0o1000,
            };
        }
    }
    mode
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbolic_for_common_modes() {
        assert_eq!(to_symbolic(0o100644), "-rw-r--r--");
        assert_eq!(to_symbolic(0o100755), "-rwxr-xr-x");
        assert_eq!(to_symbolic(0o040755), "drwxr-xr-x");
        assert_eq!(to_symbolic(0o120777), "lrwxrwxrwx");
    }

    #[test]
    fn symbolic_special_bits() {
        assert_eq!(to_symbolic(0o104755), "-rwsr-xr-x");
        assert_eq!(to_symbolic(0o104644), "-rwSr--r--");
        assert_eq!(to_symbolic(0o102711), "-rwx--s--x");
        assert_eq!(to_symbolic(0o041777), "drwxrwxrwt");
        assert_eq!(to_symbolic(0o041776), "drwxrwxrwT");
    }

    #[test]
    fn octal_from_symbolic() {
        assert_eq!(to_octal("-rw-r--r--"), 0o644);
        assert_eq!(to_octal("drwxr-xr-x"), 0o755);
        assert_eq!(to_octal("-rwsr-xr-x"), 0o4755);
        assert_eq!(to_octal("-rwSr--r--"), 0o4644);
        assert_eq!(to_octal("drwxrwxrwt"), 0o1777);
    }

    #[test]
    fn octal_tolerates_garbage() {
        // Lenient by contract: unknown characters are dropped, short input
        // is left-padded, and nothing ever errors.
        assert_eq!(to_octal(""), 0);
        assert_eq!(to_octal("banana"), 0);
        assert_eq!(to_octal("??x"), 0o001);
        assert_eq!(to_octal("rw-r--r--"), 0o644);
    }

    #[test]
    fn round_trip_all_permission_modes() {
        for mode in 0..=0o7777u32 {
            let symbolic = to_symbolic(0o100000 | mode);
            assert_eq!(to_octal(&symbolic), mode, "mode {mode:o} via {symbolic}");
        }
    }
}
